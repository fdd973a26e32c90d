//! # FileHasher - Streaming File Checksums
//!
//! FileHasher computes and verifies MD5, SHA-1, SHA-256 and SHA-512 digests
//! of files and text. Files are streamed in bounded-size chunks, so memory
//! use stays flat regardless of file size, and the result never depends on
//! the chunk size used to read them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use filehasher::FileHasher;
//!
//! let hasher = FileHasher::new("sha256").unwrap();
//! let digest = hasher.hash_file("document.pdf").unwrap();
//! assert!(hasher.verify_file("document.pdf", &digest.to_uppercase()).unwrap());
//! ```
//!
//! ## Directory Checksums
//!
//! ```no_run
//! use filehasher::{generate_checksum_file, HashAlgorithm};
//!
//! let checksums = generate_checksum_file("./release", HashAlgorithm::Sha256).unwrap();
//! for (path, digest) in checksums.iter() {
//!     println!("{}  {}", digest, path);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod fs;
pub mod hash;

// Re-export commonly used types
pub use config::{HashAlgorithm, HasherConfig, DEFAULT_CHUNK_SIZE};
pub use error::{ErrorKind, HasherError, Result};
pub use hash::{generate_checksum_file, ChecksumMap, FileHasher, TextEncoding};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
