use crate::ipc::{IpcError, Result};

/// Byte order of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
	/// Little-endian body (header flag `1`).
	Little,
	/// Big-endian body (header flag `0`).
	Big,
}

impl Endianness {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Little => "little",
			Self::Big => "big",
		}
	}
}

/// Message kind carried in header byte 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
	/// Fire-and-forget message.
	Async,
	/// Request expecting a response.
	Sync,
	/// Response to a sync request.
	Response,
	/// Sentinel used when no valid header could be read.
	Unknown,
}

impl RequestType {
	/// Map a raw header byte to a request type.
	pub fn from_raw(raw: i8) -> Self {
		match raw {
			0 => Self::Async,
			1 => Self::Sync,
			2 => Self::Response,
			_ => Self::Unknown,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Async => "async",
			Self::Sync => "sync",
			Self::Response => "response",
			Self::Unknown => "unknown",
		}
	}
}

/// Fixed eight-byte IPC message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
	/// Body byte-order flag; `0` selects big-endian.
	pub byte_order: u8,
	/// Raw request type (`0` async, `1` sync, `2` response).
	pub request_type: i8,
	/// Compression flag (`0` or `1`).
	pub compressed: u8,
	/// Unused header byte.
	pub reserved: u8,
	/// Total message length including this header.
	pub message_size: u32,
}

impl MessageHeader {
	/// Serialized header length.
	pub const SIZE: usize = 8;
	/// Byte-order flag value accepted by [`MessageHeader::is_valid`].
	pub const LITTLE_ENDIAN_FLAG: u8 = 0x01;

	/// Parse a header from the beginning of `bytes`.
	///
	/// The size field is always little-endian; the byte-order flag only governs the body.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let header = bytes.get(0..Self::SIZE).ok_or(IpcError::InvalidHeader { len: bytes.len() })?;

		Ok(Self {
			byte_order: header[0],
			request_type: i8::from_ne_bytes([header[1]]),
			compressed: header[2],
			reserved: header[3],
			message_size: u32::from_le_bytes([header[4], header[5], header[6], header[7]]),
		})
	}

	/// Check the header against the accepted flag combinations.
	///
	/// Big-endian headers are rejected even though [`MessageHeader::byte_order`] can describe them.
	pub fn is_valid(&self) -> bool {
		self.byte_order == Self::LITTLE_ENDIAN_FLAG
			&& (0..=2).contains(&self.request_type)
			&& self.compressed <= 1
			&& self.message_size > 9
	}

	/// Return `self` when valid, otherwise [`IpcError::HeaderRejected`].
	pub fn validate(self) -> Result<Self> {
		if self.is_valid() { Ok(self) } else { Err(IpcError::HeaderRejected { header: self }) }
	}

	/// Body byte order selected by the flag in byte 0.
	pub fn byte_order(&self) -> Endianness {
		if self.byte_order == 0x00 { Endianness::Big } else { Endianness::Little }
	}

	/// Request type carried by this header.
	pub fn request(&self) -> RequestType {
		RequestType::from_raw(self.request_type)
	}

	/// Whether the body is compressed.
	pub fn is_compressed(&self) -> bool {
		self.compressed == 1
	}

	/// Length of the body that follows the header.
	pub fn body_len(&self) -> usize {
		(self.message_size as usize).saturating_sub(Self::SIZE)
	}
}
