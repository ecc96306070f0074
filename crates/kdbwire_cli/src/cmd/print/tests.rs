use kdbwire::ipc::{Adverb, Attribute, Dict, Primitive, PrimitiveArity, Table, Value, Vector, VectorData, temporal};
use serde_json::json;

use super::{PrintOptions, atom_string, value_to_json};
use crate::cmd::test_support::{json_on_fixture, run_on_fixture};

fn symbols(names: &[&str]) -> Value {
	Value::Vector(Vector {
		attribute: Attribute::None,
		data: VectorData::Symbol(names.iter().map(|name| (*name).to_owned()).collect()),
	})
}

#[test]
fn atoms_render_in_json_with_type_codes() {
	assert_eq!(value_to_json(&Value::Int(7)), json!({ "type": -6, "value": 7 }));
	assert_eq!(value_to_json(&Value::Symbol("ab".into())), json!({ "type": -11, "value": "ab" }));
	assert_eq!(value_to_json(&Value::Float(f64::NAN)), json!({ "type": -9, "value": null }));
	assert_eq!(value_to_json(&Value::Date(temporal::date(1))), json!({ "type": -14, "value": "2000-01-02T00:00:00+00:00" }));
}

#[test]
fn vector_json_keeps_attribute() {
	let value = Value::Vector(Vector {
		attribute: Attribute::Sorted,
		data: VectorData::Int(vec![1, 2]),
	});
	assert_eq!(value_to_json(&value), json!({ "type": 6, "attribute": "sorted", "value": [1, 2] }));
}

#[test]
fn char_json_is_text_or_raw_bytes() {
	let text = Value::Vector(Vector {
		attribute: Attribute::None,
		data: VectorData::Char(b"hi".to_vec()),
	});
	assert_eq!(value_to_json(&text)["value"], json!("hi"));

	let latin1 = Value::Vector(Vector {
		attribute: Attribute::None,
		data: VectorData::Char(vec![b'a', 0xe9]),
	});
	assert_eq!(value_to_json(&latin1)["value"], json!([97, 233]));
}

#[test]
fn table_json_keeps_column_order() {
	let dict = Dict::new(
		symbols(&["b", "a"]),
		Value::List(kdbwire::ipc::List {
			attribute: Attribute::None,
			items: vec![symbols(&["x"]), symbols(&["y"])],
		}),
	);
	let table = Table::try_from(dict).expect("dict converts");
	let json = value_to_json(&Value::Table(table));

	assert_eq!(json["rows"], 1);
	assert_eq!(json["columns"][0]["name"], "b");
	assert_eq!(json["columns"][1]["name"], "a");
}

#[test]
fn adverb_json_wraps_inner_function() {
	let value = Value::Adverb(
		Adverb::EachLeft,
		Box::new(Value::Primitive(Primitive {
			arity: PrimitiveArity::Binary,
			index: 4,
		})),
	);
	assert_eq!(
		value_to_json(&value),
		json!({ "type": 111, "adverb": "each_left", "value": { "type": 102, "index": 4 } })
	);
}

#[test]
fn atom_text_uses_q_style_markers() {
	let options = PrintOptions::default();
	assert_eq!(atom_string(&Value::Symbol("abc".into()), options).as_deref(), Some("`abc"));
	assert_eq!(atom_string(&Value::Byte(0x0f), options).as_deref(), Some("0x0f"));
	assert_eq!(atom_string(&symbols(&["a"]), options), None);
}

#[test]
fn text_decode_prints_table_summary() {
	let output = run_on_fixture("decode", "sync_table.bin", &[]);
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("request: sync"));
	assert!(stdout.contains("table[3] {"));
	assert!(stdout.contains("sym = symbol[3] `a `b `c"));
}

#[test]
fn header_json_reports_validity() {
	let json = json_on_fixture("header", "response_compressed.bin", &[]);

	assert_eq!(json["byte_order"], "little");
	assert_eq!(json["request"], "response");
	assert_eq!(json["compressed"], true);
	assert_eq!(json["message_size"], 38);
	assert_eq!(json["valid"], true);
}
