use thiserror::Error;

use crate::ipc::MessageHeader;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, IpcError>;

/// Errors produced while reading, decompressing, and decoding IPC data.
#[derive(Debug, Error)]
pub enum IpcError {
	/// Filesystem or stream IO failure other than a short read.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Fewer than eight header bytes were available.
	#[error("invalid header: need 8 bytes, have {len}")]
	InvalidHeader {
		/// Bytes available when the header was read.
		len: usize,
	},
	/// Header parsed but failed validation.
	#[error(
		"invalid header: byte_order={} request_type={} compressed={} size={}",
		header.byte_order,
		header.request_type,
		header.compressed,
		header.message_size
	)]
	HeaderRejected {
		/// Parsed header fields.
		header: MessageHeader,
	},
	/// Not enough bytes remained for a requested read.
	#[error("truncated input at offset {at}, need {need} bytes, remaining {rem}")]
	TruncatedInput {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Recognized type tag that this decoder does not implement.
	#[error("unsupported type {code}")]
	UnsupportedType {
		/// Wire type tag.
		code: i8,
	},
	/// Unrecognized type tag.
	#[error("unknown type {code} at offset {at}")]
	UnknownType {
		/// Wire type tag.
		code: i8,
		/// Offset of the tag byte.
		at: usize,
	},
	/// Attribute byte outside the defined set.
	#[error("unknown attribute byte {byte} at offset {at}")]
	UnknownAttribute {
		/// Raw attribute byte.
		byte: u8,
		/// Offset of the attribute byte.
		at: usize,
	},
	/// Decoded child had the wrong shape for its parent.
	#[error("conversion failed: expected {expected}, got {got}")]
	Conversion {
		/// Expected logical shape.
		expected: &'static str,
		/// Actual shape description.
		got: String,
	},
	/// Compressed stream violated a decompression invariant.
	#[error("corrupt compressed data at offset {at}: {reason}")]
	CorruptData {
		/// Output or input offset where the violation was detected.
		at: usize,
		/// Violated invariant.
		reason: &'static str,
	},
	/// Declared uncompressed size exceeded the safety limit.
	#[error("declared uncompressed size {declared} exceeds limit {limit} bytes")]
	DecompressedTooLarge {
		/// Size stored in the compressed stream.
		declared: usize,
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Value nesting exceeded the configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// The peer encoded an error value.
	#[error("remote error: {message}")]
	Remote {
		/// Error text sent by the peer.
		message: String,
	},
}

impl IpcError {
	/// Whether this error is a peer-reported failure rather than a local decode fault.
	pub fn is_remote(&self) -> bool {
		matches!(self, Self::Remote { .. })
	}

	/// Whether this error came from reading or validating the message header.
	pub fn is_header(&self) -> bool {
		matches!(self, Self::InvalidHeader { .. } | Self::HeaderRejected { .. })
	}
}
