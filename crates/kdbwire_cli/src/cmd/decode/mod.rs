use std::fs::File;
use std::path::PathBuf;

use kdbwire::ipc::{DecodeOptions, Result, Value, decode_message, read_value_from_file};
use tracing::debug;

use crate::cmd::print::{PrintOptions, print_value, value_to_json};
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Treat the file as a persisted value instead of a framed message.
	#[arg(long)]
	pub persisted: bool,
	#[arg(long)]
	pub json: bool,
	#[arg(long, default_value_t = DecodeOptions::default().max_depth)]
	pub max_depth: u32,
}

/// Decode a framed message or persisted value and print its value tree.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		persisted,
		json,
		max_depth,
	} = args;

	let options = DecodeOptions::with_max_depth(max_depth);
	debug!(path = %path.display(), persisted, max_depth, "decoding file");

	let (request, value): (Option<&'static str>, Value) = if persisted {
		(None, read_value_from_file(&path, &options)?)
	} else {
		let message = decode_message(File::open(&path)?, &options);
		(Some(message.request.as_str()), message.value?)
	};

	if json {
		let payload = DecodeJson {
			path: path.display().to_string(),
			request,
			value: value_to_json(&value),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	if let Some(request) = request {
		println!("request: {request}");
	}
	println!("type: {}", value.type_code());
	print_value(&value, 0, 0, PrintOptions::default());

	Ok(())
}

#[derive(serde::Serialize)]
struct DecodeJson {
	path: String,
	request: Option<&'static str>,
	value: serde_json::Value,
}
