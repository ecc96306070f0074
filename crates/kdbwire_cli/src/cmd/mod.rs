/// Value decode command.
pub mod decode;
/// Header inspection command.
pub mod header;
/// Text and JSON rendering of decoded values.
pub mod print;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod util;
