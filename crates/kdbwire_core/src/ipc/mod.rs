mod bytes;
mod compression;
mod decode;
mod error;
mod header;
mod message;
mod persisted;
pub mod temporal;
mod types;
mod value;

/// Bounded byte cursor.
pub use bytes::Cursor;
/// Decompressor entry point and limits.
pub use compression::{MAX_DECOMPRESSED_BYTES, RESERVED_PREFIX, decompress};
/// Value decoding entry points and options.
pub use decode::{DecodeOptions, ValueDecoder, decode_value};
/// Error and result aliases.
pub use error::{IpcError, Result};
/// Message header representation.
pub use header::{Endianness, MessageHeader, RequestType};
/// Framed message decoding.
pub use message::{DecodedMessage, decode_message, decode_message_bytes};
/// Persisted-value readers.
pub use persisted::{PERSISTED_PREFIX_LEN, read_value_from_bytes, read_value_from_file};
/// Temporal wrapper types.
pub use temporal::{Minute, Month, Second, TimeOfDay};
/// Type tags and the element type catalog.
pub use types::{ElementKind, TypeCatalog, code};
/// Decoded value model.
pub use value::{Adverb, Attribute, Dict, Function, List, Primitive, PrimitiveArity, Table, Value, Vector, VectorData};
