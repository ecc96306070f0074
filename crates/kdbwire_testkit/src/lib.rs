//! Shared test helpers for workspace crates.
//!
//! Besides fixture paths this crate carries a reference compressor and a handful of body
//! builders, so tests can produce wire input without a running peer.

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Compress a whole message (header included) into a compressed body.
///
/// Output is the 4-byte little-endian total size followed by the control/literal/back-reference
/// stream. The first eight message bytes are not encoded.
pub fn compress(message: &[u8]) -> Vec<u8> {
	let total = message.len();
	let mut out = Vec::with_capacity(total / 2 + 16);
	out.extend_from_slice(&(total as u32).to_le_bytes());
	out.push(0);

	let mut flags_at = 4;
	let mut flags = 0_u8;
	let mut bit = 1_u8;
	let mut table = [0_usize; 256];
	let mut pending: Option<(usize, usize)> = None;
	let mut hash = 0_usize;
	let mut pos = 8;

	while pos < total {
		if bit == 0 {
			out[flags_at] = flags;
			flags_at = out.len();
			out.push(0);
			flags = 0;
			bit = 1;
		}

		let mut src = 0;
		let mut literal = pos + 3 > total;
		if !literal {
			hash = usize::from(message[pos] ^ message[pos + 1]);
			src = table[hash];
			literal = src == 0 || message[pos] != message[src];
		}

		if let Some((slot, at)) = pending.take() {
			table[slot] = at;
		}

		if literal {
			pending = Some((hash, pos));
			out.push(message[pos]);
			pos += 1;
		} else {
			table[hash] = pos;
			flags |= bit;
			src += 2;
			pos += 2;
			let start = pos;
			let limit = (pos + 255).min(total);
			while message[pos] == message[src] {
				pos += 1;
				if pos >= limit {
					break;
				}
				src += 1;
			}
			out.push(hash as u8);
			out.push((pos - start) as u8);
		}

		bit = if bit == 0x80 { 0 } else { bit << 1 };
	}

	out[flags_at] = flags;
	out
}

/// Frame an uncompressed little-endian message.
pub fn frame_message(request_type: u8, body: &[u8]) -> Vec<u8> {
	frame(request_type, false, body)
}

/// Frame a little-endian message with a compressed body.
pub fn frame_compressed(request_type: u8, body: &[u8]) -> Vec<u8> {
	let plain = frame_message(request_type, body);
	frame(request_type, true, &compress(&plain))
}

fn frame(request_type: u8, compressed: bool, body: &[u8]) -> Vec<u8> {
	let size = (body.len() + 8) as u32;
	let mut out = vec![0x01, request_type, u8::from(compressed), 0x00];
	out.extend_from_slice(&size.to_le_bytes());
	out.extend_from_slice(body);
	out
}

/// Prefix a value body the way persisted values are stored.
pub fn persisted(body: &[u8]) -> Vec<u8> {
	let mut out = vec![0xff, 0x01];
	out.extend_from_slice(body);
	out
}

/// Little-endian int vector body.
pub fn int_vector(items: &[i32]) -> Vec<u8> {
	let mut out = vector_prefix(6, items.len());
	for item in items {
		out.extend_from_slice(&item.to_le_bytes());
	}
	out
}

/// Little-endian long vector body.
pub fn long_vector(items: &[i64]) -> Vec<u8> {
	let mut out = vector_prefix(7, items.len());
	for item in items {
		out.extend_from_slice(&item.to_le_bytes());
	}
	out
}

/// Symbol vector body.
pub fn symbol_vector(items: &[&str]) -> Vec<u8> {
	let mut out = vector_prefix(11, items.len());
	for item in items {
		out.extend_from_slice(item.as_bytes());
		out.push(0);
	}
	out
}

/// Char vector body.
pub fn char_vector(text: &str) -> Vec<u8> {
	let mut out = vector_prefix(10, text.len());
	out.extend_from_slice(text.as_bytes());
	out
}

/// Generic list body over already encoded children.
pub fn list(children: &[Vec<u8>]) -> Vec<u8> {
	let mut out = vector_prefix(0, children.len());
	for child in children {
		out.extend_from_slice(child);
	}
	out
}

/// `depth` single-element lists wrapped around `leaf`.
pub fn nested_lists(depth: usize, leaf: &[u8]) -> Vec<u8> {
	let mut out = Vec::with_capacity(depth * 6 + leaf.len());
	for _ in 0..depth {
		out.extend_from_slice(&vector_prefix(0, 1));
	}
	out.extend_from_slice(leaf);
	out
}

fn vector_prefix(type_code: u8, len: usize) -> Vec<u8> {
	let mut out = vec![type_code, 0x00];
	out.extend_from_slice(&(len as u32).to_le_bytes());
	out
}
