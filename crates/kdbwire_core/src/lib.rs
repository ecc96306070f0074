//! Decoder for the kdb+ IPC wire format: message headers, compressed bodies, and value trees.

/// Header parsing, decompression, value decoding, and persisted-value readers.
pub mod ipc;
