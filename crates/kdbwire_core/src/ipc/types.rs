use crate::ipc::VectorData;

/// Wire type tags. Atoms use the negated vector tag.
pub mod code {
	/// Generic (mixed) list.
	pub const LIST: i8 = 0;
	/// Boolean.
	pub const BOOLEAN: i8 = 1;
	/// 16-byte GUID.
	pub const GUID: i8 = 2;
	/// Byte.
	pub const BYTE: i8 = 4;
	/// 16-bit integer.
	pub const SHORT: i8 = 5;
	/// 32-bit integer.
	pub const INT: i8 = 6;
	/// 64-bit integer.
	pub const LONG: i8 = 7;
	/// 32-bit float.
	pub const REAL: i8 = 8;
	/// 64-bit float.
	pub const FLOAT: i8 = 9;
	/// Character; a char vector is a string.
	pub const CHAR: i8 = 10;
	/// Interned symbol.
	pub const SYMBOL: i8 = 11;
	/// Nanoseconds since the epoch.
	pub const TIMESTAMP: i8 = 12;
	/// Months since the epoch.
	pub const MONTH: i8 = 13;
	/// Days since the epoch.
	pub const DATE: i8 = 14;
	/// Fractional days since the epoch.
	pub const DATETIME: i8 = 15;
	/// Nanosecond duration.
	pub const TIMESPAN: i8 = 16;
	/// Minutes from midnight.
	pub const MINUTE: i8 = 17;
	/// Seconds from midnight.
	pub const SECOND: i8 = 18;
	/// Milliseconds from midnight.
	pub const TIME: i8 = 19;
	/// First enumerated-symbol vector tag.
	pub const ENUM_FIRST: i8 = 20;
	/// Last enumerated-symbol vector tag.
	pub const ENUM_LAST: i8 = 76;
	/// Anymap.
	pub const ANYMAP: i8 = 77;
	/// First mapped nested list tag.
	pub const MAPPED_FIRST: i8 = 78;
	/// Last mapped nested list tag.
	pub const MAPPED_LAST: i8 = 97;
	/// Table (flipped dictionary).
	pub const TABLE: i8 = 98;
	/// Dictionary.
	pub const DICT: i8 = 99;
	/// Lambda with namespace and source text.
	pub const LAMBDA: i8 = 100;
	/// Unary primitive.
	pub const UNARY_PRIMITIVE: i8 = 101;
	/// Binary primitive.
	pub const BINARY_PRIMITIVE: i8 = 102;
	/// Ternary operator.
	pub const TERNARY_OPERATOR: i8 = 103;
	/// Projection.
	pub const PROJECTION: i8 = 104;
	/// Composition.
	pub const COMPOSITION: i8 = 105;
	/// `'` each.
	pub const EACH: i8 = 106;
	/// `/` over.
	pub const OVER: i8 = 107;
	/// `\` scan.
	pub const SCAN: i8 = 108;
	/// `':` each-prior.
	pub const PRIOR: i8 = 109;
	/// `/:` each-right.
	pub const EACH_RIGHT: i8 = 110;
	/// `\:` each-left.
	pub const EACH_LEFT: i8 = 111;
	/// Dynamic load.
	pub const DYNAMIC_LOAD: i8 = 112;
	/// Sorted dictionary.
	pub const SORTED_DICT: i8 = 127;
	/// Error atom.
	pub const ERROR: i8 = -128;
}

/// Element kind of an atom or simple vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
	/// Boolean.
	Boolean,
	/// GUID.
	Guid,
	/// Byte.
	Byte,
	/// Short.
	Short,
	/// Int.
	Int,
	/// Long.
	Long,
	/// Real.
	Real,
	/// Float.
	Float,
	/// Char.
	Char,
	/// Symbol.
	Symbol,
	/// Timestamp.
	Timestamp,
	/// Month.
	Month,
	/// Date.
	Date,
	/// Datetime.
	Datetime,
	/// Timespan.
	Timespan,
	/// Minute.
	Minute,
	/// Second.
	Second,
	/// Time.
	Time,
}

impl ElementKind {
	/// Every element kind, ordered by wire code.
	pub const ALL: [ElementKind; 18] = [
		Self::Boolean,
		Self::Guid,
		Self::Byte,
		Self::Short,
		Self::Int,
		Self::Long,
		Self::Real,
		Self::Float,
		Self::Char,
		Self::Symbol,
		Self::Timestamp,
		Self::Month,
		Self::Date,
		Self::Datetime,
		Self::Timespan,
		Self::Minute,
		Self::Second,
		Self::Time,
	];

	/// Positive wire code of vectors of this kind.
	pub const fn code(self) -> i8 {
		match self {
			Self::Boolean => code::BOOLEAN,
			Self::Guid => code::GUID,
			Self::Byte => code::BYTE,
			Self::Short => code::SHORT,
			Self::Int => code::INT,
			Self::Long => code::LONG,
			Self::Real => code::REAL,
			Self::Float => code::FLOAT,
			Self::Char => code::CHAR,
			Self::Symbol => code::SYMBOL,
			Self::Timestamp => code::TIMESTAMP,
			Self::Month => code::MONTH,
			Self::Date => code::DATE,
			Self::Datetime => code::DATETIME,
			Self::Timespan => code::TIMESPAN,
			Self::Minute => code::MINUTE,
			Self::Second => code::SECOND,
			Self::Time => code::TIME,
		}
	}

	/// Encoded element width, or `None` for variable-width symbols.
	pub fn width(self) -> Option<usize> {
		match self {
			Self::Boolean | Self::Byte | Self::Char => Some(1),
			Self::Short => Some(2),
			Self::Int | Self::Real | Self::Month | Self::Date | Self::Minute | Self::Second | Self::Time => Some(4),
			Self::Long | Self::Float | Self::Timestamp | Self::Datetime | Self::Timespan => Some(8),
			Self::Guid => Some(16),
			Self::Symbol => None,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Boolean => "boolean",
			Self::Guid => "guid",
			Self::Byte => "byte",
			Self::Short => "short",
			Self::Int => "int",
			Self::Long => "long",
			Self::Real => "real",
			Self::Float => "float",
			Self::Char => "char",
			Self::Symbol => "symbol",
			Self::Timestamp => "timestamp",
			Self::Month => "month",
			Self::Date => "date",
			Self::Datetime => "datetime",
			Self::Timespan => "timespan",
			Self::Minute => "minute",
			Self::Second => "second",
			Self::Time => "time",
		}
	}
}

/// Static type-code lookup for atoms and simple vectors.
#[derive(Debug)]
pub struct TypeCatalog {
	kinds: [Option<ElementKind>; 20],
}

impl TypeCatalog {
	/// Catalog of the stable protocol type table.
	pub const STANDARD: TypeCatalog = TypeCatalog::build();

	const fn build() -> Self {
		let mut kinds = [None; 20];
		let mut idx = 0;
		while idx < ElementKind::ALL.len() {
			let kind = ElementKind::ALL[idx];
			kinds[kind.code() as usize] = Some(kind);
			idx += 1;
		}
		Self { kinds }
	}

	/// Element kind for a simple vector tag or its negated atom tag.
	pub fn kind(&self, code: i8) -> Option<ElementKind> {
		let slot = usize::from(code.unsigned_abs());
		self.kinds.get(slot).copied().flatten()
	}

	/// `(element width, kind)` for fixed-width vector tags.
	pub fn layout(&self, code: i8) -> Option<(usize, ElementKind)> {
		let kind = self.kind(code)?;
		kind.width().map(|width| (width, kind))
	}

	/// Empty container for `len` elements of `kind`.
	pub fn allocate(&self, kind: ElementKind, len: usize) -> VectorData {
		match kind {
			ElementKind::Boolean => VectorData::Boolean(Vec::with_capacity(len)),
			ElementKind::Guid => VectorData::Guid(Vec::with_capacity(len)),
			ElementKind::Byte => VectorData::Byte(Vec::with_capacity(len)),
			ElementKind::Short => VectorData::Short(Vec::with_capacity(len)),
			ElementKind::Int => VectorData::Int(Vec::with_capacity(len)),
			ElementKind::Long => VectorData::Long(Vec::with_capacity(len)),
			ElementKind::Real => VectorData::Real(Vec::with_capacity(len)),
			ElementKind::Float => VectorData::Float(Vec::with_capacity(len)),
			ElementKind::Char => VectorData::Char(Vec::with_capacity(len)),
			ElementKind::Symbol => VectorData::Symbol(Vec::with_capacity(len)),
			ElementKind::Timestamp => VectorData::Timestamp(Vec::with_capacity(len)),
			ElementKind::Month => VectorData::Month(Vec::with_capacity(len)),
			ElementKind::Date => VectorData::Date(Vec::with_capacity(len)),
			ElementKind::Datetime => VectorData::Datetime(Vec::with_capacity(len)),
			ElementKind::Timespan => VectorData::Timespan(Vec::with_capacity(len)),
			ElementKind::Minute => VectorData::Minute(Vec::with_capacity(len)),
			ElementKind::Second => VectorData::Second(Vec::with_capacity(len)),
			ElementKind::Time => VectorData::Time(Vec::with_capacity(len)),
		}
	}

	/// Whether `code` is recognized but intentionally not decoded.
	pub fn is_unsupported(&self, code: i8) -> bool {
		matches!(code, code::DYNAMIC_LOAD | code::ENUM_FIRST..=code::ANYMAP | code::MAPPED_FIRST..=code::MAPPED_LAST)
			|| (-code::ENUM_LAST..=-code::ENUM_FIRST).contains(&code)
	}
}

#[cfg(test)]
mod tests;
