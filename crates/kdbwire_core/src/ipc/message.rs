use std::io::Read;

use tracing::{debug, warn};

use crate::ipc::{DecodeOptions, IpcError, MessageHeader, RequestType, Result, Value, decode_value, decompress};

/// Outcome of decoding one framed message.
///
/// `request` is populated even when `value` holds an error, so callers can still tell a failed
/// async notification from a failed sync call.
#[derive(Debug)]
pub struct DecodedMessage {
	/// Request type from the header, or [`RequestType::Unknown`] when the header was unusable.
	pub request: RequestType,
	/// Parsed header when eight bytes were available.
	pub header: Option<MessageHeader>,
	/// Decoded body value or the first error hit.
	pub value: Result<Value>,
}

impl DecodedMessage {
	/// Drop the framing and keep only the value result.
	pub fn into_value(self) -> Result<Value> {
		self.value
	}
}

/// Decode one framed message from a byte stream.
///
/// Reads the 8-byte header, then exactly `message_size - 8` body bytes. Compressed bodies are
/// decompressed before value decoding.
pub fn decode_message<R: Read>(mut src: R, options: &DecodeOptions) -> DecodedMessage {
	let header = match read_header(&mut src) {
		Ok(header) => header,
		Err(err) => {
			return DecodedMessage {
				request: RequestType::Unknown,
				header: None,
				value: Err(err),
			};
		}
	};

	if let Err(err) = header.validate() {
		warn!(
			byte_order = header.byte_order,
			request_type = header.request_type,
			compressed = header.compressed,
			size = header.message_size,
			"rejecting message header"
		);
		return DecodedMessage {
			request: RequestType::Unknown,
			header: Some(header),
			value: Err(err),
		};
	}

	debug!(
		request = header.request().as_str(),
		byte_order = header.byte_order().as_str(),
		compressed = header.is_compressed(),
		size = header.message_size,
		"message header"
	);

	DecodedMessage {
		request: header.request(),
		header: Some(header),
		value: decode_body(&mut src, &header, options),
	}
}

/// Decode one framed message held in memory.
pub fn decode_message_bytes(bytes: &[u8], options: &DecodeOptions) -> DecodedMessage {
	decode_message(bytes, options)
}

fn read_header<R: Read>(src: &mut R) -> Result<MessageHeader> {
	let mut raw = Vec::with_capacity(MessageHeader::SIZE);
	src.by_ref().take(MessageHeader::SIZE as u64).read_to_end(&mut raw)?;
	MessageHeader::parse(&raw)
}

fn decode_body<R: Read>(src: &mut R, header: &MessageHeader, options: &DecodeOptions) -> Result<Value> {
	let need = header.body_len();
	let mut body = Vec::new();
	src.take(need as u64).read_to_end(&mut body)?;
	if body.len() < need {
		return Err(IpcError::TruncatedInput {
			at: MessageHeader::SIZE,
			need,
			rem: body.len(),
		});
	}

	let endianness = header.byte_order();
	if !header.is_compressed() {
		return decode_value(&body, endianness, options);
	}

	let inflated = decompress(&body)?;
	debug!(compressed = body.len(), inflated = inflated.len(), "inflated message body");
	let payload = inflated.get(MessageHeader::SIZE..).unwrap_or_default();
	decode_value(payload, endianness, options)
}

#[cfg(test)]
mod tests;
