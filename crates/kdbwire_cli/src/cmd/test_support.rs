use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use kdbwire_testkit::{fixture_path, target_dir};

static KDBWIRE_BIN: OnceLock<PathBuf> = OnceLock::new();

/// Run `kdbwire <command> <fixtures/name> <flags...>`.
pub(crate) fn run_on_fixture(command: &str, fixture: &str, flags: &[&str]) -> Output {
	let path = fixture_path(fixture);
	Command::new(kdbwire_bin())
		.arg(command)
		.arg(&path)
		.args(flags)
		.output()
		.expect("kdbwire command executes")
}

/// Run a `--json` command on a fixture and parse its stdout.
pub(crate) fn json_on_fixture(command: &str, fixture: &str, flags: &[&str]) -> serde_json::Value {
	let mut all_flags = vec!["--json"];
	all_flags.extend_from_slice(flags);
	let output = run_on_fixture(command, fixture, &all_flags);
	assert!(
		output.status.success(),
		"kdbwire {command} {fixture} exited with {}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout is one json document")
}

/// Run a command expected to fail and return its stderr.
pub(crate) fn stderr_on_failure(command: &str, fixture: &str, flags: &[&str]) -> String {
	let output = run_on_fixture(command, fixture, flags);
	assert!(!output.status.success(), "kdbwire {command} {fixture} unexpectedly succeeded");
	String::from_utf8_lossy(&output.stderr).into_owned()
}

fn kdbwire_bin() -> &'static PathBuf {
	KDBWIRE_BIN.get_or_init(|| {
		if let Some(path) = option_env!("CARGO_BIN_EXE_kdbwire") {
			return PathBuf::from(path);
		}

		let status = Command::new("cargo")
			.current_dir(env!("CARGO_MANIFEST_DIR"))
			.args(["build", "--quiet", "--bin", "kdbwire"])
			.status()
			.expect("cargo build executes");
		assert!(status.success(), "building the kdbwire binary failed");
		target_dir().join("debug").join(format!("kdbwire{}", std::env::consts::EXE_SUFFIX))
	})
}
