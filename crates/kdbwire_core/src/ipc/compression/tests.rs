use super::{MAX_DECOMPRESSED_BYTES, RESERVED_PREFIX, decompress};
use crate::ipc::IpcError;

/// Char vector `"abc"` repeated eight times, compressed as one literal run plus one
/// overlapping back-reference.
const REPEATED_TEXT: [u8; 17] = [
	0x26, 0x00, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x18, 0x00, 0x00, 0x00, 0x61, 0x62, 0x02, 0x63, 0x03, 0x13,
];

#[test]
fn decodes_overlapping_back_reference() {
	let out = decompress(&REPEATED_TEXT).expect("fixture decompresses");
	assert_eq!(out.len(), 0x26);
	assert_eq!(&out[..RESERVED_PREFIX], &[0_u8; 8]);
	assert_eq!(&out[8..14], &[0x0a, 0x00, 0x18, 0x00, 0x00, 0x00]);
	assert_eq!(&out[14..], b"abcabcabcabcabcabcabcabc");
}

#[test]
fn all_literal_stream_copies_bytes() {
	let mut compressed = vec![12, 0, 0, 0, 0x00];
	compressed.extend_from_slice(&[1, 2, 3, 4]);
	let out = decompress(&compressed).expect("literal stream decompresses");
	assert_eq!(&out[8..], &[1, 2, 3, 4]);
}

#[test]
fn back_reference_before_any_pair_is_corrupt() {
	let compressed = [16, 0, 0, 0, 0x01, 0x00, 0x00];
	let err = decompress(&compressed).expect_err("empty table slot is not a valid source");
	assert!(matches!(err, IpcError::CorruptData { at: 8, .. }));
}

#[test]
fn back_reference_past_declared_size_is_corrupt() {
	let compressed = [14, 0, 0, 0, 0b0000_0100, b'a', b'b', 0x03, 200];
	let err = decompress(&compressed).expect_err("run overruns output");
	assert!(matches!(err, IpcError::CorruptData { at: 10, reason } if reason.contains("overruns")));
}

#[test]
fn exhausted_input_is_corrupt() {
	let compressed = [20, 0, 0, 0, 0x00, 1, 2, 3];
	let err = decompress(&compressed).expect_err("input ends early");
	assert!(matches!(err, IpcError::CorruptData { at: 8, .. }));
}

#[test]
fn rejects_size_smaller_than_header() {
	let err = decompress(&[4, 0, 0, 0]).expect_err("size below reserved prefix");
	assert!(matches!(err, IpcError::CorruptData { at: 0, .. }));

	let err = decompress(&[1, 2]).expect_err("size field missing");
	assert!(matches!(err, IpcError::CorruptData { at: 0, .. }));
}

#[test]
fn rejects_oversized_declaration_before_allocating() {
	let err = decompress(&[0xff, 0xff, 0xff, 0xff, 0x00]).expect_err("4 GiB declaration");
	assert!(matches!(err, IpcError::DecompressedTooLarge { limit, .. } if limit == MAX_DECOMPRESSED_BYTES));
}

#[test]
fn header_sized_output_needs_no_input() {
	let out = decompress(&[8, 0, 0, 0]).expect("nothing to decode");
	assert_eq!(out, vec![0_u8; 8]);
}

#[test]
fn rejects_size_the_input_cannot_reach() {
	let err = decompress(&[0x00, 0x00, 0x10, 0x00, 0x00, 0x61]).expect_err("two bytes cannot expand to 1 MiB");
	assert!(matches!(err, IpcError::CorruptData { at: 0, reason } if reason.contains("input can encode")));
}
