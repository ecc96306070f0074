use tracing::{trace, warn};
use uuid::Uuid;

use crate::ipc::{
	Adverb, Attribute, Cursor, Dict, ElementKind, Endianness, Function, IpcError, List, Minute, Month, Primitive, PrimitiveArity, Result, Second, Table,
	TimeOfDay, TypeCatalog, Value, Vector, VectorData, code, temporal,
};

/// Most elements reserved ahead of decoding a list or symbol vector; longer ones grow as they fill.
const PREALLOC_LIMIT: usize = 1024;

/// Runtime limits for value decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth; the outermost value sits at depth 0.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 128 }
	}
}

impl DecodeOptions {
	/// Default options with a custom depth ceiling.
	pub fn with_max_depth(max_depth: u32) -> Self {
		Self { max_depth }
	}
}

/// Decode one value from the start of `bytes`.
///
/// Bytes after the value are ignored.
pub fn decode_value(bytes: &[u8], endianness: Endianness, options: &DecodeOptions) -> Result<Value> {
	let mut cursor = Cursor::new(bytes);
	ValueDecoder::new(&TypeCatalog::STANDARD, endianness, options).decode(&mut cursor)
}

/// Recursive-descent decoder over one byte order and type catalog.
#[derive(Debug, Clone, Copy)]
pub struct ValueDecoder<'a> {
	catalog: &'a TypeCatalog,
	endianness: Endianness,
	options: &'a DecodeOptions,
}

impl<'a> ValueDecoder<'a> {
	/// Bind a catalog, byte order, and limits.
	pub fn new(catalog: &'a TypeCatalog, endianness: Endianness, options: &'a DecodeOptions) -> Self {
		Self {
			catalog,
			endianness,
			options,
		}
	}

	/// Decode one value at the cursor and leave the cursor after it.
	pub fn decode(&self, cursor: &mut Cursor<'_>) -> Result<Value> {
		self.decode_at(cursor, 0)
	}

	fn decode_at(&self, cursor: &mut Cursor<'_>, depth: u32) -> Result<Value> {
		if depth >= self.options.max_depth {
			warn!(max_depth = self.options.max_depth, at = cursor.pos(), "value nesting exceeds depth limit");
			return Err(IpcError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let at = cursor.pos();
		let type_code = cursor.read_i8()?;

		if let Some(kind) = self.catalog.kind(type_code) {
			return if type_code < 0 {
				self.decode_atom(cursor, kind)
			} else {
				self.decode_vector(cursor, type_code, kind)
			};
		}

		match type_code {
			code::ERROR => Err(IpcError::Remote {
				message: cursor.read_cstring()?,
			}),
			code::LIST => {
				let attribute = self.read_attribute(cursor)?;
				let len = self.read_len(cursor)?;
				trace!(at, len, depth, "list");
				let items = self.decode_children(cursor, len, depth)?;
				Ok(Value::List(List { attribute, items }))
			}
			code::TABLE => {
				let attribute = self.read_attribute(cursor)?;
				trace!(at, depth, "table");
				let dict = match self.decode_at(cursor, depth + 1)? {
					Value::Dict(dict) => *dict,
					other => {
						return Err(IpcError::Conversion {
							expected: "dict of table columns",
							got: other.describe(),
						});
					}
				};
				let mut table = Table::try_from(dict)?;
				table.attribute = attribute;
				Ok(Value::Table(table))
			}
			code::DICT | code::SORTED_DICT => {
				trace!(at, depth, sorted = type_code == code::SORTED_DICT, "dict");
				let key = self.decode_at(cursor, depth + 1)?;
				let value = self.decode_at(cursor, depth + 1)?;
				let mut dict = Dict::new(key, value);
				if type_code == code::SORTED_DICT {
					dict.attribute = Attribute::Sorted;
				}
				Ok(Value::Dict(Box::new(dict)))
			}
			code::LAMBDA => {
				let namespace = cursor.read_cstring()?;
				let body = match self.decode_at(cursor, depth + 1)? {
					Value::Vector(Vector {
						data: VectorData::Char(body),
						..
					}) => body,
					other => {
						return Err(IpcError::Conversion {
							expected: "char vector lambda body",
							got: other.describe(),
						});
					}
				};
				Ok(Value::Function(Function { namespace, body }))
			}
			code::UNARY_PRIMITIVE | code::BINARY_PRIMITIVE | code::TERNARY_OPERATOR => {
				let arity = match type_code {
					code::UNARY_PRIMITIVE => PrimitiveArity::Unary,
					code::BINARY_PRIMITIVE => PrimitiveArity::Binary,
					_ => PrimitiveArity::Ternary,
				};
				let index = cursor.read_u8()?;
				Ok(Value::Primitive(Primitive { arity, index }))
			}
			code::PROJECTION | code::COMPOSITION => {
				let len = self.read_len(cursor)?;
				trace!(at, len, depth, code = type_code, "function application");
				let items = self.decode_children(cursor, len, depth)?;
				Ok(if type_code == code::PROJECTION {
					Value::Projection(items)
				} else {
					Value::Composition(items)
				})
			}
			_ => {
				if let Some(adverb) = Adverb::from_code(type_code) {
					let inner = self.decode_at(cursor, depth + 1)?;
					return Ok(Value::Adverb(adverb, Box::new(inner)));
				}
				if self.catalog.is_unsupported(type_code) {
					return Err(IpcError::UnsupportedType { code: type_code });
				}
				Err(IpcError::UnknownType { code: type_code, at })
			}
		}
	}

	fn decode_children(&self, cursor: &mut Cursor<'_>, len: usize, depth: u32) -> Result<Vec<Value>> {
		let mut items = Vec::with_capacity(len.min(PREALLOC_LIMIT));
		for _ in 0..len {
			items.push(self.decode_at(cursor, depth + 1)?);
		}
		Ok(items)
	}

	fn read_attribute(&self, cursor: &mut Cursor<'_>) -> Result<Attribute> {
		let at = cursor.pos();
		let byte = cursor.read_u8()?;
		Attribute::from_byte(byte).ok_or(IpcError::UnknownAttribute { byte, at })
	}

	fn read_len(&self, cursor: &mut Cursor<'_>) -> Result<usize> {
		Ok(cursor.read_u32(self.endianness)? as usize)
	}

	fn decode_atom(&self, cursor: &mut Cursor<'_>, kind: ElementKind) -> Result<Value> {
		let e = self.endianness;
		Ok(match kind {
			ElementKind::Boolean => Value::Boolean(cursor.read_u8()? != 0),
			ElementKind::Guid => Value::Guid(Uuid::from_bytes(cursor.read_array::<16>()?)),
			ElementKind::Byte => Value::Byte(cursor.read_u8()?),
			ElementKind::Char => Value::Char(cursor.read_u8()?),
			ElementKind::Symbol => Value::Symbol(cursor.read_cstring()?),
			ElementKind::Short => Value::Short(cursor.read_i16(e)?),
			ElementKind::Int => Value::Int(cursor.read_i32(e)?),
			ElementKind::Long => Value::Long(cursor.read_i64(e)?),
			ElementKind::Real => Value::Real(cursor.read_f32(e)?),
			ElementKind::Float => Value::Float(cursor.read_f64(e)?),
			ElementKind::Timestamp => Value::Timestamp(temporal::timestamp(cursor.read_i64(e)?)),
			ElementKind::Month => Value::Month(Month::from_offset(cursor.read_i32(e)?)),
			ElementKind::Date => Value::Date(temporal::date(cursor.read_i32(e)?)),
			ElementKind::Datetime => Value::Datetime(temporal::datetime(cursor.read_f64(e)?)),
			ElementKind::Timespan => Value::Timespan(temporal::timespan(cursor.read_i64(e)?)),
			ElementKind::Minute => Value::Minute(Minute::from_minutes(cursor.read_i32(e)?)),
			ElementKind::Second => Value::Second(Second::from_seconds(cursor.read_i32(e)?)),
			ElementKind::Time => Value::Time(TimeOfDay::from_millis(cursor.read_i32(e)?)),
		})
	}

	fn decode_vector(&self, cursor: &mut Cursor<'_>, type_code: i8, kind: ElementKind) -> Result<Value> {
		let attribute = self.read_attribute(cursor)?;
		let len = self.read_len(cursor)?;
		trace!(at = cursor.pos(), len, kind = kind.as_str(), "vector");

		let Some((width, kind)) = self.catalog.layout(type_code) else {
			let mut names = Vec::with_capacity(len.min(PREALLOC_LIMIT));
			for _ in 0..len {
				names.push(cursor.read_cstring()?);
			}
			return Ok(Value::Vector(Vector {
				attribute,
				data: VectorData::Symbol(names),
			}));
		};

		let need = len.checked_mul(width).ok_or(IpcError::TruncatedInput {
			at: cursor.pos(),
			need: usize::MAX,
			rem: cursor.remaining(),
		})?;
		let raw = cursor.read_exact(need)?;
		let data = self.fill(kind, len, raw);
		Ok(Value::Vector(Vector { attribute, data }))
	}

	/// Reinterpret `raw` (exactly `len` elements) as a typed vector.
	fn fill(&self, kind: ElementKind, len: usize, raw: &[u8]) -> VectorData {
		let e = self.endianness;
		let mut data = self.catalog.allocate(kind, len);
		match &mut data {
			VectorData::Boolean(items) => items.extend(raw.iter().map(|byte| *byte != 0)),
			VectorData::Guid(items) => items.extend(raw.chunks_exact(16).map(guid)),
			VectorData::Byte(items) => items.extend_from_slice(raw),
			VectorData::Char(bytes) => bytes.extend_from_slice(raw),
			VectorData::Short(items) => items.extend(scalars::<i16>(raw, e)),
			VectorData::Int(items) => items.extend(scalars::<i32>(raw, e)),
			VectorData::Long(items) => items.extend(scalars::<i64>(raw, e)),
			VectorData::Real(items) => items.extend(scalars::<f32>(raw, e)),
			VectorData::Float(items) => items.extend(scalars::<f64>(raw, e)),
			VectorData::Timestamp(items) => items.extend(scalars::<i64>(raw, e).map(temporal::timestamp)),
			VectorData::Month(items) => items.extend(scalars::<i32>(raw, e).map(Month::from_offset)),
			VectorData::Date(items) => items.extend(scalars::<i32>(raw, e).map(temporal::date)),
			VectorData::Datetime(items) => items.extend(scalars::<f64>(raw, e).map(temporal::datetime)),
			VectorData::Timespan(items) => items.extend(scalars::<i64>(raw, e).map(temporal::timespan)),
			VectorData::Minute(items) => items.extend(scalars::<i32>(raw, e).map(Minute::from_minutes)),
			VectorData::Second(items) => items.extend(scalars::<i32>(raw, e).map(Second::from_seconds)),
			VectorData::Time(items) => items.extend(scalars::<i32>(raw, e).map(TimeOfDay::from_millis)),
			VectorData::Symbol(_) => {}
		}
		data
	}
}

fn guid(raw: &[u8]) -> Uuid {
	let mut bytes = [0_u8; 16];
	bytes.copy_from_slice(raw);
	Uuid::from_bytes(bytes)
}

fn scalars<T: WireScalar>(raw: &[u8], endianness: Endianness) -> impl Iterator<Item = T> + '_ {
	raw.chunks_exact(size_of::<T>()).map(move |chunk| T::from_chunk(chunk, endianness))
}

/// Fixed-width numeric read from an exactly sized chunk.
trait WireScalar: Sized {
	fn from_chunk(chunk: &[u8], endianness: Endianness) -> Self;
}

macro_rules! wire_scalar {
	($($ty:ty),* $(,)?) => {
		$(
			impl WireScalar for $ty {
				fn from_chunk(chunk: &[u8], endianness: Endianness) -> Self {
					let mut buf = [0_u8; size_of::<$ty>()];
					buf.copy_from_slice(chunk);
					match endianness {
						Endianness::Little => <$ty>::from_le_bytes(buf),
						Endianness::Big => <$ty>::from_be_bytes(buf),
					}
				}
			}
		)*
	};
}

wire_scalar!(i16, i32, i64, f32, f64);
