#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod cmd;

#[derive(Parser)]
#[command(name = "kdbwire", about = "kdb+ IPC message inspection tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Parse and validate the 8-byte message header.
	Header(cmd::header::Args),
	/// Decode a framed message or persisted value.
	Decode(cmd::decode::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing() {
	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with(fmt::layer().with_writer(std::io::stderr))
		.init();
}

fn run() -> kdbwire::ipc::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Header(args) => cmd::header::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
	}
}
