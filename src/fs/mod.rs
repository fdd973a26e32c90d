//! File system helpers
//!
//! Directory traversal used by batch checksum generation.

mod walk;

pub use walk::*;
