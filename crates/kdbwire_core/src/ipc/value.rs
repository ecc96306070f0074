use chrono::{DateTime, TimeDelta, Utc};
use uuid::Uuid;

use crate::ipc::{ElementKind, IpcError, Minute, Month, Result, Second, TimeOfDay, code};

/// Sort/uniqueness marker attached to vectors, lists, dicts, and tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attribute {
	/// No attribute.
	#[default]
	None,
	/// `s#`
	Sorted,
	/// `u#`
	Unique,
	/// `p#`
	Parted,
	/// `g#`
	Grouped,
}

impl Attribute {
	/// Map a wire attribute byte.
	pub fn from_byte(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::None),
			1 => Some(Self::Sorted),
			2 => Some(Self::Unique),
			3 => Some(Self::Parted),
			5 => Some(Self::Grouped),
			_ => None,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Sorted => "sorted",
			Self::Unique => "unique",
			Self::Parted => "parted",
			Self::Grouped => "grouped",
		}
	}
}

/// Decoded IPC value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Boolean atom.
	Boolean(bool),
	/// GUID atom.
	Guid(Uuid),
	/// Byte atom.
	Byte(u8),
	/// Short atom.
	Short(i16),
	/// Int atom.
	Int(i32),
	/// Long atom.
	Long(i64),
	/// Real atom.
	Real(f32),
	/// Float atom.
	Float(f64),
	/// Char atom.
	Char(u8),
	/// Symbol atom.
	Symbol(String),
	/// Timestamp atom.
	Timestamp(DateTime<Utc>),
	/// Month atom.
	Month(Month),
	/// Date atom.
	Date(DateTime<Utc>),
	/// Datetime atom.
	Datetime(DateTime<Utc>),
	/// Timespan atom.
	Timespan(TimeDelta),
	/// Minute atom.
	Minute(Minute),
	/// Second atom.
	Second(Second),
	/// Time atom.
	Time(TimeOfDay),
	/// Homogeneous vector.
	Vector(Vector),
	/// Generic list of arbitrary children.
	List(List),
	/// Dictionary.
	Dict(Box<Dict>),
	/// Table.
	Table(Table),
	/// Lambda.
	Function(Function),
	/// Built-in primitive reference.
	Primitive(Primitive),
	/// Partially applied function; the first element is the function.
	Projection(Vec<Value>),
	/// Function composition.
	Composition(Vec<Value>),
	/// Function modified by an adverb.
	Adverb(Adverb, Box<Value>),
}

impl Value {
	/// Signed wire type code for this value.
	pub fn type_code(&self) -> i8 {
		match self {
			Self::Boolean(_) => -code::BOOLEAN,
			Self::Guid(_) => -code::GUID,
			Self::Byte(_) => -code::BYTE,
			Self::Short(_) => -code::SHORT,
			Self::Int(_) => -code::INT,
			Self::Long(_) => -code::LONG,
			Self::Real(_) => -code::REAL,
			Self::Float(_) => -code::FLOAT,
			Self::Char(_) => -code::CHAR,
			Self::Symbol(_) => -code::SYMBOL,
			Self::Timestamp(_) => -code::TIMESTAMP,
			Self::Month(_) => -code::MONTH,
			Self::Date(_) => -code::DATE,
			Self::Datetime(_) => -code::DATETIME,
			Self::Timespan(_) => -code::TIMESPAN,
			Self::Minute(_) => -code::MINUTE,
			Self::Second(_) => -code::SECOND,
			Self::Time(_) => -code::TIME,
			Self::Vector(vector) => vector.data.kind().code(),
			Self::List(_) => code::LIST,
			Self::Dict(_) => code::DICT,
			Self::Table(_) => code::TABLE,
			Self::Function(_) => code::LAMBDA,
			Self::Primitive(primitive) => primitive.arity.code(),
			Self::Projection(_) => code::PROJECTION,
			Self::Composition(_) => code::COMPOSITION,
			Self::Adverb(adverb, _) => adverb.code(),
		}
	}

	/// Whether this value is a scalar atom.
	pub fn is_atom(&self) -> bool {
		self.type_code() < 0
	}

	/// Attribute of a vector, list, dict, or table; [`Attribute::None`] otherwise.
	pub fn attribute(&self) -> Attribute {
		match self {
			Self::Vector(vector) => vector.attribute,
			Self::List(list) => list.attribute,
			Self::Dict(dict) => dict.attribute,
			Self::Table(table) => table.attribute,
			_ => Attribute::None,
		}
	}

	/// Element count of vectors, lists, dicts, and tables (rows).
	pub fn len(&self) -> Option<usize> {
		match self {
			Self::Vector(vector) => Some(vector.data.len()),
			Self::List(list) => Some(list.items.len()),
			Self::Dict(dict) => dict.key.len(),
			Self::Table(table) => Some(table.row_count()),
			Self::Projection(items) | Self::Composition(items) => Some(items.len()),
			_ => None,
		}
	}

	/// Borrow the entries of a symbol vector.
	pub fn as_symbols(&self) -> Option<&[String]> {
		match self {
			Self::Vector(Vector {
				data: VectorData::Symbol(items),
				..
			}) => Some(items),
			_ => None,
		}
	}

	/// Borrow the raw bytes of a char vector.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::Vector(Vector {
				data: VectorData::Char(bytes),
				..
			}) => Some(bytes),
			_ => None,
		}
	}

	/// Borrow a char vector as text; `None` when it is not valid UTF-8.
	pub fn as_str(&self) -> Option<&str> {
		std::str::from_utf8(self.as_bytes()?).ok()
	}

	/// Borrow the children of a generic list.
	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Self::List(list) => Some(&list.items),
			_ => None,
		}
	}

	/// Borrow a dictionary.
	pub fn as_dict(&self) -> Option<&Dict> {
		match self {
			Self::Dict(dict) => Some(dict),
			_ => None,
		}
	}

	/// Borrow a table.
	pub fn as_table(&self) -> Option<&Table> {
		match self {
			Self::Table(table) => Some(table),
			_ => None,
		}
	}

	/// Short shape label used in conversion errors and diagnostics.
	pub fn describe(&self) -> String {
		match self {
			Self::Vector(vector) => format!("{} vector", vector.data.kind().as_str()),
			Self::List(_) => "list".to_owned(),
			Self::Dict(_) => "dict".to_owned(),
			Self::Table(_) => "table".to_owned(),
			Self::Function(_) => "lambda".to_owned(),
			Self::Primitive(_) => "primitive".to_owned(),
			Self::Projection(_) => "projection".to_owned(),
			Self::Composition(_) => "composition".to_owned(),
			Self::Adverb(adverb, _) => format!("{} adverb", adverb.as_str()),
			atom => format!("atom type {}", atom.type_code()),
		}
	}
}

/// Homogeneous vector with its attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
	/// Sort/uniqueness marker.
	pub attribute: Attribute,
	/// Typed elements.
	pub data: VectorData,
}

impl Vector {
	/// Element kind stored in this vector.
	pub fn kind(&self) -> ElementKind {
		self.data.kind()
	}
}

/// Typed storage for simple vectors.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorData {
	/// Booleans.
	Boolean(Vec<bool>),
	/// GUIDs.
	Guid(Vec<Uuid>),
	/// Raw bytes.
	Byte(Vec<u8>),
	/// Shorts.
	Short(Vec<i16>),
	/// Ints.
	Int(Vec<i32>),
	/// Longs.
	Long(Vec<i64>),
	/// Reals.
	Real(Vec<f32>),
	/// Floats.
	Float(Vec<f64>),
	/// Chars, one byte each, exactly as sent.
	Char(Vec<u8>),
	/// Symbols.
	Symbol(Vec<String>),
	/// Timestamps.
	Timestamp(Vec<DateTime<Utc>>),
	/// Months.
	Month(Vec<Month>),
	/// Dates.
	Date(Vec<DateTime<Utc>>),
	/// Datetimes.
	Datetime(Vec<DateTime<Utc>>),
	/// Timespans.
	Timespan(Vec<TimeDelta>),
	/// Minutes.
	Minute(Vec<Minute>),
	/// Seconds.
	Second(Vec<Second>),
	/// Times.
	Time(Vec<TimeOfDay>),
}

impl VectorData {
	/// Element kind stored in this vector.
	pub fn kind(&self) -> ElementKind {
		match self {
			Self::Boolean(_) => ElementKind::Boolean,
			Self::Guid(_) => ElementKind::Guid,
			Self::Byte(_) => ElementKind::Byte,
			Self::Short(_) => ElementKind::Short,
			Self::Int(_) => ElementKind::Int,
			Self::Long(_) => ElementKind::Long,
			Self::Real(_) => ElementKind::Real,
			Self::Float(_) => ElementKind::Float,
			Self::Char(_) => ElementKind::Char,
			Self::Symbol(_) => ElementKind::Symbol,
			Self::Timestamp(_) => ElementKind::Timestamp,
			Self::Month(_) => ElementKind::Month,
			Self::Date(_) => ElementKind::Date,
			Self::Datetime(_) => ElementKind::Datetime,
			Self::Timespan(_) => ElementKind::Timespan,
			Self::Minute(_) => ElementKind::Minute,
			Self::Second(_) => ElementKind::Second,
			Self::Time(_) => ElementKind::Time,
		}
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		match self {
			Self::Boolean(items) => items.len(),
			Self::Guid(items) => items.len(),
			Self::Byte(items) => items.len(),
			Self::Short(items) => items.len(),
			Self::Int(items) => items.len(),
			Self::Long(items) => items.len(),
			Self::Real(items) => items.len(),
			Self::Float(items) => items.len(),
			Self::Char(bytes) => bytes.len(),
			Self::Symbol(items) => items.len(),
			Self::Timestamp(items) | Self::Date(items) | Self::Datetime(items) => items.len(),
			Self::Month(items) => items.len(),
			Self::Timespan(items) => items.len(),
			Self::Minute(items) => items.len(),
			Self::Second(items) => items.len(),
			Self::Time(items) => items.len(),
		}
	}

	/// Whether the vector has no elements.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Generic list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct List {
	/// Sort/uniqueness marker.
	pub attribute: Attribute,
	/// Children in wire order.
	pub items: Vec<Value>,
}

/// Key/value pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct Dict {
	/// Keys.
	pub key: Value,
	/// Values.
	pub value: Value,
	/// [`Attribute::Sorted`] for sorted dictionaries.
	pub attribute: Attribute,
}

impl Dict {
	/// Pair a key and a value without an attribute.
	pub fn new(key: Value, value: Value) -> Self {
		Self {
			key,
			value,
			attribute: Attribute::None,
		}
	}

	/// Check that sized keys and values have equal lengths.
	pub fn check_shape(&self) -> Result<()> {
		match (self.key.len(), self.value.len()) {
			(Some(keys), Some(values)) if keys != values => Err(IpcError::Conversion {
				expected: "dict keys and values of equal length",
				got: format!("{keys} keys, {values} values"),
			}),
			_ => Ok(()),
		}
	}
}

/// Column-oriented table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
	/// Sort/uniqueness marker.
	pub attribute: Attribute,
	/// Column names in order.
	pub column_names: Vec<String>,
	/// Column values in the same order.
	pub columns: Vec<Value>,
}

impl Table {
	/// Borrow a column by name.
	pub fn column(&self, name: &str) -> Option<&Value> {
		let idx = self.column_names.iter().position(|item| item == name)?;
		self.columns.get(idx)
	}

	/// Row count taken from the first sized column.
	pub fn row_count(&self) -> usize {
		self.columns.iter().find_map(Value::len).unwrap_or(0)
	}

	/// Convert back to the symbol-keyed dictionary form.
	pub fn into_dict(self) -> Dict {
		Dict::new(
			Value::Vector(Vector {
				attribute: Attribute::None,
				data: VectorData::Symbol(self.column_names),
			}),
			Value::List(List {
				attribute: Attribute::None,
				items: self.columns,
			}),
		)
	}
}

impl TryFrom<Dict> for Table {
	type Error = IpcError;

	fn try_from(dict: Dict) -> Result<Self> {
		dict.check_shape()?;
		let Dict { key, value, .. } = dict;

		let column_names = match key {
			Value::Vector(Vector {
				data: VectorData::Symbol(names),
				..
			}) => names,
			other => {
				return Err(IpcError::Conversion {
					expected: "symbol vector of column names",
					got: other.describe(),
				});
			}
		};

		let columns = match value {
			Value::List(list) => list.items,
			other => {
				return Err(IpcError::Conversion {
					expected: "list of column values",
					got: other.describe(),
				});
			}
		};

		Ok(Self {
			attribute: Attribute::None,
			column_names,
			columns,
		})
	}
}

/// Lambda source with its namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
	/// Namespace the lambda was defined in; empty for root.
	pub namespace: String,
	/// Source text bytes, exactly as sent.
	pub body: Vec<u8>,
}

impl Function {
	/// Source text; `None` when it is not valid UTF-8.
	pub fn body_str(&self) -> Option<&str> {
		std::str::from_utf8(&self.body).ok()
	}
}

/// Primitive arity class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveArity {
	/// Unary primitive.
	Unary,
	/// Binary primitive.
	Binary,
	/// Ternary operator.
	Ternary,
}

impl PrimitiveArity {
	/// Wire type code.
	pub fn code(self) -> i8 {
		match self {
			Self::Unary => code::UNARY_PRIMITIVE,
			Self::Binary => code::BINARY_PRIMITIVE,
			Self::Ternary => code::TERNARY_OPERATOR,
		}
	}
}

/// Reference to a built-in primitive by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Primitive {
	/// Arity class from the type tag.
	pub arity: PrimitiveArity,
	/// Index into the peer's primitive table.
	pub index: u8,
}

/// Adverb applied to a function value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adverb {
	/// `'`
	Each,
	/// `/`
	Over,
	/// `\`
	Scan,
	/// `':`
	Prior,
	/// `/:`
	EachRight,
	/// `\:`
	EachLeft,
}

impl Adverb {
	/// Map a wire type code.
	pub fn from_code(value: i8) -> Option<Self> {
		match value {
			code::EACH => Some(Self::Each),
			code::OVER => Some(Self::Over),
			code::SCAN => Some(Self::Scan),
			code::PRIOR => Some(Self::Prior),
			code::EACH_RIGHT => Some(Self::EachRight),
			code::EACH_LEFT => Some(Self::EachLeft),
			_ => None,
		}
	}

	/// Wire type code.
	pub fn code(self) -> i8 {
		match self {
			Self::Each => code::EACH,
			Self::Over => code::OVER,
			Self::Scan => code::SCAN,
			Self::Prior => code::PRIOR,
			Self::EachRight => code::EACH_RIGHT,
			Self::EachLeft => code::EACH_LEFT,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Each => "each",
			Self::Over => "over",
			Self::Scan => "scan",
			Self::Prior => "prior",
			Self::EachRight => "each_right",
			Self::EachLeft => "each_left",
		}
	}
}
