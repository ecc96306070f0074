use kdbwire_testkit::fixture_path;

use crate::ipc::{DecodeOptions, IpcError, Value, VectorData, read_value_from_bytes, read_value_from_file};

#[test]
fn skips_prefix_and_decodes_little_endian() {
	let value = read_value_from_bytes(&[0xff, 0x01, 0xfa, 0x2a, 0, 0, 0], &DecodeOptions::default()).expect("value decodes");
	assert_eq!(value, Value::Int(42));
}

#[test]
fn prefix_bytes_are_not_checked() {
	let value = read_value_from_bytes(&[0x00, 0x00, 0xff, 0x01], &DecodeOptions::default()).expect("value decodes");
	assert_eq!(value, Value::Boolean(true));
}

#[test]
fn missing_prefix_is_truncated() {
	let err = read_value_from_bytes(&[0xff], &DecodeOptions::default()).expect_err("prefix incomplete");
	assert!(matches!(err, IpcError::TruncatedInput { at: 0, need: 2, rem: 1 }));
}

#[test]
fn reads_persisted_dict_fixture() {
	let value = read_value_from_file(fixture_path("persisted_dict.bin"), &DecodeOptions::default()).expect("fixture decodes");
	let dict = value.as_dict().expect("dict value");
	assert_eq!(dict.key.as_symbols(), Some(&["a".to_owned(), "b".to_owned()][..]));
	let Value::Vector(values) = &dict.value else {
		panic!("expected int vector");
	};
	assert_eq!(values.data, VectorData::Int(vec![1, 2]));
}

#[test]
fn missing_file_is_io_error() {
	let err = read_value_from_file(fixture_path("does_not_exist.bin"), &DecodeOptions::default()).expect_err("file is absent");
	assert!(matches!(err, IpcError::Io(_)));
}
