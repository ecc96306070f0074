use crate::ipc::{DecodeOptions, IpcError, RequestType, Value, VectorData, decode_message, decode_message_bytes};

fn frame(header: [u8; 4], body: &[u8]) -> Vec<u8> {
	let size = u32::try_from(body.len() + 8).expect("test body fits");
	let mut out = header.to_vec();
	out.extend_from_slice(&size.to_le_bytes());
	out.extend_from_slice(body);
	out
}

#[test]
fn decodes_uncompressed_sync_message() {
	let bytes = frame([1, 1, 0, 0], &[0xfa, 7, 0, 0, 0]);
	let message = decode_message_bytes(&bytes, &DecodeOptions::default());

	assert_eq!(message.request, RequestType::Sync);
	assert_eq!(message.header.map(|header| header.message_size), Some(13));
	assert_eq!(message.into_value().expect("body decodes"), Value::Int(7));
}

#[test]
fn decodes_compressed_response_body() {
	let compressed = [
		0x26, 0x00, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x18, 0x00, 0x00, 0x00, 0x61, 0x62, 0x02, 0x63, 0x03, 0x13,
	];
	let bytes = frame([1, 2, 1, 0], &compressed);
	let message = decode_message_bytes(&bytes, &DecodeOptions::default());

	assert_eq!(message.request, RequestType::Response);
	let value = message.into_value().expect("compressed body decodes");
	assert_eq!(value.as_str(), Some("abcabcabcabcabcabcabcabc"));
}

#[test]
fn short_header_reports_unknown_request() {
	let message = decode_message_bytes(&[1, 1, 0], &DecodeOptions::default());
	assert_eq!(message.request, RequestType::Unknown);
	assert!(message.header.is_none());
	let err = message.into_value().expect_err("header incomplete");
	assert!(matches!(err, IpcError::InvalidHeader { len: 3 }));
	assert!(err.is_header());
}

#[test]
fn rejected_header_keeps_parsed_fields() {
	let bytes = frame([0, 1, 0, 0], &[0xfa, 0, 0, 0, 7]);
	let message = decode_message_bytes(&bytes, &DecodeOptions::default());
	assert_eq!(message.request, RequestType::Unknown);
	assert_eq!(message.header.map(|header| header.byte_order), Some(0));
	assert!(matches!(message.value, Err(IpcError::HeaderRejected { .. })));
}

#[test]
fn declared_size_past_input_is_truncated() {
	let mut bytes = frame([1, 0, 0, 0], &[6, 0, 1, 0, 0, 0, 1, 0, 0, 0]);
	bytes.truncate(bytes.len() - 3);
	let message = decode_message_bytes(&bytes, &DecodeOptions::default());

	assert_eq!(message.request, RequestType::Async);
	assert!(matches!(message.value, Err(IpcError::TruncatedInput { at: 8, need: 10, rem: 7 })));
}

#[test]
fn body_failure_still_reports_request_type() {
	let bytes = frame([1, 0, 0, 0], &[3, 0]);
	let message = decode_message_bytes(&bytes, &DecodeOptions::default());
	assert_eq!(message.request, RequestType::Async);
	assert!(matches!(message.value, Err(IpcError::UnknownType { code: 3, at: 0 })));
}

#[test]
fn remote_error_response() {
	let bytes = frame([1, 2, 0, 0], &[0x80, b'r', b'a', b'n', b'k', 0]);
	let message = decode_message_bytes(&bytes, &DecodeOptions::default());
	assert_eq!(message.request, RequestType::Response);
	let err = message.into_value().expect_err("peer sent an error");
	assert!(matches!(err, IpcError::Remote { ref message } if message == "rank"));
}

#[test]
fn stream_reader_stops_at_message_boundary() {
	let mut bytes = frame([1, 0, 0, 0], &[0xff, 1]);
	bytes.extend(frame([1, 1, 0, 0], &[4, 0, 2, 0, 0, 0, 9, 8]));
	let mut reader = bytes.as_slice();

	let first = decode_message(&mut reader, &DecodeOptions::default());
	assert_eq!(first.request, RequestType::Async);
	assert_eq!(first.into_value().expect("first decodes"), Value::Boolean(true));

	let second = decode_message(&mut reader, &DecodeOptions::default());
	assert_eq!(second.request, RequestType::Sync);
	let Value::Vector(vector) = second.into_value().expect("second decodes") else {
		panic!("expected byte vector");
	};
	assert_eq!(vector.data, VectorData::Byte(vec![9, 8]));
	assert!(reader.is_empty());
}
