use kdbwire::ipc::{Attribute, Value, VectorData};
use serde_json::json;

use crate::cmd::util::truncate;

/// Output truncation limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of elements printed per vector, list, or table.
	pub max_items: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum recursive print depth.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_items: 16,
			max_string_len: 200,
			max_print_depth: 8,
		}
	}
}

/// Print one decoded value tree as indented text.
pub fn print_value(value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Vector(vector) => {
			let mut items = element_strings(&vector.data, options);
			if vector.data.len() > options.max_items && !matches!(vector.data, VectorData::Char(_)) {
				items.push(format!("... {} more", vector.data.len() - options.max_items));
			}
			println!("{pad}{}[{}]{} {}", vector.kind().as_str(), vector.data.len(), attribute_suffix(vector.attribute), items.join(" "));
		}
		Value::List(list) => {
			print_children(&format!("list{}", attribute_suffix(list.attribute)), &list.items, indent, depth, options);
		}
		Value::Dict(dict) => {
			if depth >= options.max_print_depth {
				println!("{pad}dict {{ ... }}");
				return;
			}
			println!("{pad}dict{} {{", attribute_suffix(dict.attribute));
			println!("{pad}  key:");
			print_value(&dict.key, indent + 4, depth + 1, options);
			println!("{pad}  value:");
			print_value(&dict.value, indent + 4, depth + 1, options);
			println!("{pad}}}");
		}
		Value::Table(table) => {
			if depth >= options.max_print_depth {
				println!("{pad}table[{}] {{ ... }}", table.row_count());
				return;
			}
			println!("{pad}table[{}]{} {{", table.row_count(), attribute_suffix(table.attribute));
			for (name, column) in table.column_names.iter().zip(&table.columns).take(options.max_items) {
				print!("{pad}  {name} = ");
				print_value(column, 0, depth + 1, options);
			}
			if table.columns.len() > options.max_items {
				println!("{pad}  ... {} more columns", table.columns.len() - options.max_items);
			}
			println!("{pad}}}");
		}
		Value::Function(function) => {
			let namespace = if function.namespace.is_empty() { "." } else { function.namespace.as_str() };
			println!("{pad}lambda[{namespace}] {}", truncate(&String::from_utf8_lossy(&function.body), options.max_string_len));
		}
		Value::Primitive(primitive) => println!("{pad}primitive({}) #{}", primitive.arity.code(), primitive.index),
		Value::Projection(items) => print_children("projection", items, indent, depth, options),
		Value::Composition(items) => print_children("composition", items, indent, depth, options),
		Value::Adverb(adverb, inner) => {
			println!("{pad}{}:", adverb.as_str());
			if depth >= options.max_print_depth {
				println!("{pad}  ...");
				return;
			}
			print_value(inner, indent + 2, depth + 1, options);
		}
		atom => println!("{pad}{}", atom_string(atom, options).unwrap_or_default()),
	}
}

fn print_children(label: &str, items: &[Value], indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	if depth >= options.max_print_depth {
		println!("{pad}{label}[... {} items]", items.len());
		return;
	}
	println!("{pad}{label}[{}] (", items.len());
	for item in items.iter().take(options.max_items) {
		print_value(item, indent + 2, depth + 1, options);
	}
	if items.len() > options.max_items {
		println!("{pad}  ... {} more", items.len() - options.max_items);
	}
	println!("{pad})");
}

fn attribute_suffix(attribute: Attribute) -> String {
	match attribute {
		Attribute::None => String::new(),
		other => format!(" #{}", other.as_str()),
	}
}

/// Text of a scalar atom, `None` for composite values.
pub fn atom_string(value: &Value, options: PrintOptions) -> Option<String> {
	Some(match value {
		Value::Boolean(item) => item.to_string(),
		Value::Guid(item) => item.to_string(),
		Value::Byte(item) => format!("0x{item:02x}"),
		Value::Short(item) => item.to_string(),
		Value::Int(item) => item.to_string(),
		Value::Long(item) => item.to_string(),
		Value::Real(item) => item.to_string(),
		Value::Float(item) => item.to_string(),
		Value::Char(item) => format!("{:?}", char::from(*item)),
		Value::Symbol(item) => format!("`{}", truncate(item, options.max_string_len)),
		Value::Timestamp(item) | Value::Date(item) | Value::Datetime(item) => item.to_rfc3339(),
		Value::Month(item) => item.to_string(),
		Value::Timespan(item) => item.to_string(),
		Value::Minute(item) => item.to_string(),
		Value::Second(item) => item.to_string(),
		Value::Time(item) => item.to_string(),
		_ => return None,
	})
}

fn element_strings(data: &VectorData, options: PrintOptions) -> Vec<String> {
	let limit = options.max_items;
	match data {
		VectorData::Char(bytes) => vec![format!("{:?}", truncate(&String::from_utf8_lossy(bytes), options.max_string_len))],
		VectorData::Boolean(items) => render(items, limit, |item| u8::from(*item).to_string()),
		VectorData::Guid(items) => render(items, limit, ToString::to_string),
		VectorData::Byte(items) => render(items, limit, |item| format!("0x{item:02x}")),
		VectorData::Short(items) => render(items, limit, ToString::to_string),
		VectorData::Int(items) => render(items, limit, ToString::to_string),
		VectorData::Long(items) => render(items, limit, ToString::to_string),
		VectorData::Real(items) => render(items, limit, ToString::to_string),
		VectorData::Float(items) => render(items, limit, ToString::to_string),
		VectorData::Symbol(items) => render(items, limit, |item| format!("`{item}")),
		VectorData::Timestamp(items) | VectorData::Date(items) | VectorData::Datetime(items) => render(items, limit, |item| item.to_rfc3339()),
		VectorData::Month(items) => render(items, limit, ToString::to_string),
		VectorData::Timespan(items) => render(items, limit, ToString::to_string),
		VectorData::Minute(items) => render(items, limit, ToString::to_string),
		VectorData::Second(items) => render(items, limit, ToString::to_string),
		VectorData::Time(items) => render(items, limit, ToString::to_string),
	}
}

fn render<T>(items: &[T], limit: usize, fmt: impl Fn(&T) -> String) -> Vec<String> {
	items.iter().take(limit).map(fmt).collect()
}

/// Convert a decoded value tree into JSON.
///
/// Every node carries its signed wire `type`; containers add `attribute`. Temporal values are
/// rendered as text, non-finite floats become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
	let code = value.type_code();
	match value {
		Value::Vector(vector) => json!({
			"type": code,
			"attribute": vector.attribute.as_str(),
			"value": vector_to_json(&vector.data),
		}),
		Value::List(list) => json!({
			"type": code,
			"attribute": list.attribute.as_str(),
			"items": list.items.iter().map(value_to_json).collect::<Vec<_>>(),
		}),
		Value::Dict(dict) => json!({
			"type": code,
			"attribute": dict.attribute.as_str(),
			"key": value_to_json(&dict.key),
			"value": value_to_json(&dict.value),
		}),
		Value::Table(table) => json!({
			"type": code,
			"attribute": table.attribute.as_str(),
			"rows": table.row_count(),
			"columns": table
				.column_names
				.iter()
				.zip(&table.columns)
				.map(|(name, column)| json!({ "name": name, "value": value_to_json(column) }))
				.collect::<Vec<_>>(),
		}),
		Value::Function(function) => json!({
			"type": code,
			"namespace": function.namespace,
			"body": chars_to_json(&function.body),
		}),
		Value::Primitive(primitive) => json!({
			"type": code,
			"index": primitive.index,
		}),
		Value::Projection(items) | Value::Composition(items) => json!({
			"type": code,
			"items": items.iter().map(value_to_json).collect::<Vec<_>>(),
		}),
		Value::Adverb(adverb, inner) => json!({
			"type": code,
			"adverb": adverb.as_str(),
			"value": value_to_json(inner),
		}),
		atom => json!({
			"type": code,
			"value": atom_to_json(atom),
		}),
	}
}

fn atom_to_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Boolean(item) => json!(item),
		Value::Byte(item) => json!(item),
		Value::Short(item) => json!(item),
		Value::Int(item) => json!(item),
		Value::Long(item) => json!(item),
		Value::Real(item) => json!(item),
		Value::Float(item) => json!(item),
		Value::Char(item) => json!(char::from(*item).to_string()),
		Value::Symbol(item) => json!(item),
		other => atom_string(other, PrintOptions::default()).map_or(serde_json::Value::Null, serde_json::Value::String),
	}
}

fn vector_to_json(data: &VectorData) -> serde_json::Value {
	match data {
		VectorData::Boolean(items) => json!(items),
		VectorData::Byte(items) => json!(items),
		VectorData::Short(items) => json!(items),
		VectorData::Int(items) => json!(items),
		VectorData::Long(items) => json!(items),
		VectorData::Real(items) => json!(items),
		VectorData::Float(items) => json!(items),
		VectorData::Char(bytes) => chars_to_json(bytes),
		VectorData::Symbol(items) => json!(items),
		VectorData::Guid(items) => json!(render(items, items.len(), ToString::to_string)),
		VectorData::Timestamp(items) | VectorData::Date(items) | VectorData::Datetime(items) => {
			json!(render(items, items.len(), |item| item.to_rfc3339()))
		}
		VectorData::Month(items) => json!(render(items, items.len(), ToString::to_string)),
		VectorData::Timespan(items) => json!(render(items, items.len(), ToString::to_string)),
		VectorData::Minute(items) => json!(render(items, items.len(), ToString::to_string)),
		VectorData::Second(items) => json!(render(items, items.len(), ToString::to_string)),
		VectorData::Time(items) => json!(render(items, items.len(), ToString::to_string)),
	}
}

/// Text when the chars are valid UTF-8, the raw byte values otherwise.
fn chars_to_json(bytes: &[u8]) -> serde_json::Value {
	match std::str::from_utf8(bytes) {
		Ok(text) => json!(text),
		Err(_) => json!(bytes),
	}
}

#[cfg(test)]
mod tests;
