//! Streaming file hashing and verification
//!
//! Files are read in bounded-size chunks into a fresh [`Hasher`] per call,
//! so a [`FileHasher`] holds no mutable state and can be shared freely
//! between threads.

use super::checksums::{self, ChecksumMap};
use super::digest::{hash_bytes, Hasher};
use super::encoding::TextEncoding;
use crate::config::{HashAlgorithm, HasherConfig, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
use crate::error::{HasherError, IoResultExt, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Computes and verifies digests with one fixed algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHasher {
    algorithm: HashAlgorithm,
    chunk_size: usize,
}

impl Default for FileHasher {
    fn default() -> Self {
        Self::with_algorithm(HashAlgorithm::default())
    }
}

impl FileHasher {
    /// Create a hasher from an algorithm name (`md5`, `sha1`, `sha256`, `sha512`)
    pub fn new(algorithm: &str) -> Result<Self> {
        Ok(Self::with_algorithm(algorithm.parse()?))
    }

    /// Create a hasher for an already validated algorithm
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a hasher from configuration
    pub fn from_config(config: &HasherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            algorithm: config.algorithm,
            chunk_size: config.chunk_size,
        })
    }

    /// Algorithm used by every call on this hasher
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Default read chunk size in bytes
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Stream-hash a file with the default chunk size
    pub fn hash_file(&self, path: impl AsRef<Path>) -> Result<String> {
        self.hash_file_with_chunk_size(path, self.chunk_size)
    }

    /// Stream-hash a file reading `chunk_size` bytes at a time
    pub fn hash_file_with_chunk_size(
        &self,
        path: impl AsRef<Path>,
        chunk_size: usize,
    ) -> Result<String> {
        let path = path.as_ref();
        if chunk_size == 0 {
            return Err(HasherError::InvalidChunkSize(chunk_size));
        }
        // Dropped on every return below, including a failed read.
        let file = File::open(path).with_path(path)?;
        let digest = self.hash_reader(file, chunk_size).with_path(path)?;

        tracing::debug!("{} {} ({})", self.algorithm.name(), digest, path.display());
        Ok(digest)
    }

    /// Stream-hash any reader until end of stream
    ///
    /// The read buffer is clamped to `1..=MAX_CHUNK_SIZE` bytes.
    pub fn hash_reader<R: Read>(&self, mut reader: R, chunk_size: usize) -> std::io::Result<String> {
        let mut hasher = Hasher::new(self.algorithm);
        let mut buffer = vec![0u8; chunk_size.clamp(1, MAX_CHUNK_SIZE)];
        let mut chunks = 0u64;

        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            hasher.update(&buffer[..bytes_read]);
            chunks += 1;
        }

        tracing::trace!(chunks, chunk_size, "stream hashed");
        Ok(hasher.finalize())
    }

    /// Verify a file matches the expected hex digest, ignoring case
    pub fn verify_file(&self, path: impl AsRef<Path>, expected: &str) -> Result<bool> {
        let actual = self.hash_file(path)?;
        Ok(actual.to_lowercase() == expected.to_lowercase())
    }

    /// Hash the UTF-8 bytes of `text`
    pub fn hash_string(&self, text: &str) -> String {
        hash_bytes(text.as_bytes(), self.algorithm)
    }

    /// Hash `text` after encoding it with `encoding`
    pub fn hash_string_with_encoding(&self, text: &str, encoding: TextEncoding) -> Result<String> {
        let bytes = encoding.encode(text)?;
        Ok(hash_bytes(&bytes, self.algorithm))
    }

    /// Checksums for every regular file below `directory`
    pub fn generate_checksums(&self, directory: impl AsRef<Path>) -> Result<ChecksumMap> {
        checksums::generate_with(self, directory.as_ref())
    }
}
