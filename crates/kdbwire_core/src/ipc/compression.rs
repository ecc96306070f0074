use tracing::debug;

use crate::ipc::{IpcError, Result};

/// Largest uncompressed size accepted before allocation.
pub const MAX_DECOMPRESSED_BYTES: usize = 512 * 1024 * 1024;
/// Leading output bytes reserved for the original message header.
pub const RESERVED_PREFIX: usize = 8;
/// Most output bytes one input byte can produce: a two-byte back-reference yields 257.
const MAX_EXPANSION: usize = 257;

/// Decompress a message body (header already removed).
///
/// The first four input bytes hold the little-endian size of the uncompressed message,
/// header included. The returned buffer has that size; its first [`RESERVED_PREFIX`] bytes are
/// zeroed placeholders and the decoded body follows.
///
/// Each control byte selects, bit by bit, whether the next unit is one literal byte or a
/// back-reference. A back-reference names a slot in a 256-entry table keyed by
/// `byte[i] ^ byte[i + 1]` of earlier output, copies two bytes from the recorded offset, then
/// copies as many further bytes as the following length byte says.
pub fn decompress(compressed: &[u8]) -> Result<Vec<u8>> {
	let size = compressed.get(0..4).ok_or(IpcError::CorruptData {
		at: 0,
		reason: "missing uncompressed size",
	})?;
	let declared = u32::from_le_bytes([size[0], size[1], size[2], size[3]]) as usize;
	if declared < RESERVED_PREFIX {
		return Err(IpcError::CorruptData {
			at: 0,
			reason: "uncompressed size smaller than header",
		});
	}
	if declared > MAX_DECOMPRESSED_BYTES {
		return Err(IpcError::DecompressedTooLarge {
			declared,
			limit: MAX_DECOMPRESSED_BYTES,
		});
	}

	let reachable = RESERVED_PREFIX.saturating_add((compressed.len() - 4).saturating_mul(MAX_EXPANSION));
	if declared > reachable {
		return Err(IpcError::CorruptData {
			at: 0,
			reason: "uncompressed size exceeds what the input can encode",
		});
	}

	debug!(declared, compressed = compressed.len(), "decompressing message body");

	let mut input = Input { bytes: compressed, pos: 4 };
	let mut dst = vec![0_u8; declared];
	let mut table = [0_usize; 256];
	let mut cursor = RESERVED_PREFIX;
	let mut hashed = RESERVED_PREFIX;
	let mut flags = 0_u8;
	let mut mask = 0_u8;

	while cursor < declared {
		if mask == 0 {
			flags = input.next()?;
			mask = 1;
		}

		if flags & mask != 0 {
			let src = table[usize::from(input.next()?)];
			if src < RESERVED_PREFIX || src >= cursor {
				return Err(IpcError::CorruptData {
					at: cursor,
					reason: "back-reference outside decoded output",
				});
			}
			let extra = usize::from(input.next()?);
			let end = cursor + 2 + extra;
			if end > declared {
				return Err(IpcError::CorruptData {
					at: cursor,
					reason: "back-reference overruns uncompressed size",
				});
			}

			// Byte-wise so overlapping runs repeat already-copied output.
			for offset in 0..2 + extra {
				dst[cursor + offset] = dst[src + offset];
			}

			cursor += 2;
			record_pairs(&mut table, &dst, &mut hashed, cursor);
			cursor = end;
			hashed = cursor;
		} else {
			dst[cursor] = input.next()?;
			cursor += 1;
			record_pairs(&mut table, &dst, &mut hashed, cursor);
		}

		mask = if mask == 0x80 { 0 } else { mask << 1 };
	}

	Ok(dst)
}

fn record_pairs(table: &mut [usize; 256], dst: &[u8], hashed: &mut usize, cursor: usize) {
	while *hashed + 1 < cursor {
		table[usize::from(dst[*hashed] ^ dst[*hashed + 1])] = *hashed;
		*hashed += 1;
	}
}

struct Input<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl Input<'_> {
	fn next(&mut self) -> Result<u8> {
		let byte = self.bytes.get(self.pos).copied().ok_or(IpcError::CorruptData {
			at: self.pos,
			reason: "compressed input exhausted",
		})?;
		self.pos += 1;
		Ok(byte)
	}
}

#[cfg(test)]
mod tests;
