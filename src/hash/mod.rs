//! Hash computation and integrity verification module
//!
//! Provides streaming MD5, SHA-1, SHA-256 and SHA-512 hashing of files and
//! text, digest verification, and batch checksums for directory trees.

mod checksums;
mod digest;
mod encoding;
mod integrity;

pub use checksums::*;
pub use digest::*;
pub use encoding::*;
pub use integrity::*;
