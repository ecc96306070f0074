use std::fs;
use std::path::PathBuf;

use kdbwire::ipc::{MessageHeader, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Parse the message header at the start of a file and report whether it validates.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let bytes = fs::read(&path)?;
	let header = MessageHeader::parse(&bytes)?;
	let available = bytes.len().saturating_sub(MessageHeader::SIZE);

	if json {
		let payload = HeaderJson {
			path: path.display().to_string(),
			byte_order: header.byte_order().as_str(),
			byte_order_flag: header.byte_order,
			request: header.request().as_str(),
			request_type: header.request_type,
			compressed: header.is_compressed(),
			message_size: header.message_size,
			body_len: header.body_len(),
			available_body: available,
			valid: header.is_valid(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("byte_order: {} ({})", header.byte_order().as_str(), header.byte_order);
	println!("request: {} ({})", header.request().as_str(), header.request_type);
	println!("compressed: {}", header.is_compressed());
	println!("message_size: {}", header.message_size);
	println!("body_len: {}", header.body_len());
	println!("available_body: {available}");
	println!("valid: {}", header.is_valid());

	Ok(())
}

#[derive(serde::Serialize)]
struct HeaderJson {
	path: String,
	byte_order: &'static str,
	byte_order_flag: u8,
	request: &'static str,
	request_type: i8,
	compressed: bool,
	message_size: u32,
	body_len: usize,
	available_body: usize,
	valid: bool,
}
