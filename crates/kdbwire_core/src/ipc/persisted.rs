use std::fs;
use std::path::Path;

use tracing::debug;

use crate::ipc::{Cursor, DecodeOptions, Endianness, Result, TypeCatalog, Value, ValueDecoder};

/// Length of the prefix written ahead of a persisted value.
pub const PERSISTED_PREFIX_LEN: usize = 2;

/// Decode a persisted value held in memory.
///
/// The two-byte prefix is skipped unchecked and the value is read little-endian without a
/// message header.
pub fn read_value_from_bytes(bytes: &[u8], options: &DecodeOptions) -> Result<Value> {
	let mut cursor = Cursor::new(bytes);
	cursor.read_exact(PERSISTED_PREFIX_LEN)?;
	ValueDecoder::new(&TypeCatalog::STANDARD, Endianness::Little, options).decode(&mut cursor)
}

/// Read and decode a persisted value file.
pub fn read_value_from_file(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Value> {
	let path = path.as_ref();
	let bytes = fs::read(path)?;
	debug!(path = %path.display(), len = bytes.len(), "read persisted value");
	read_value_from_bytes(&bytes, options)
}

#[cfg(test)]
mod tests;
