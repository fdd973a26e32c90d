//! Error types for FileHasher
//!
//! Every failure is surfaced to the caller as a typed error. Nothing is
//! retried or silently defaulted; [`HasherError::kind`] groups the variants
//! into the four broad categories callers usually branch on.

use crate::hash::TextEncoding;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FileHasher operations
#[derive(Error, Debug)]
pub enum HasherError {
    /// Algorithm name outside the supported set
    #[error("Unsupported algorithm: {0}. Use one of md5, sha1, sha256, sha512")]
    UnsupportedAlgorithm(String),

    /// Text encoding name not recognised
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// Read chunk size must be positive
    #[error("Invalid chunk size: {0} (must be greater than zero)")]
    InvalidChunkSize(usize),

    /// Any other rejected argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Text could not be represented in the requested encoding
    #[error("'{encoding}' codec can't encode character {character:?} in position {position}")]
    Encoding {
        /// Encoding that was requested
        encoding: TextEncoding,
        /// First character it cannot represent
        character: char,
        /// Character index of `character` in the text
        position: usize,
    },

    /// I/O error while opening or streaming a file
    #[error("I/O error at '{path}': {source}")]
    Io {
        /// File being opened or read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Broad category of a [`HasherError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unsupported algorithm, unknown encoding or non-positive chunk size
    InvalidArgument,
    /// Path does not exist at call time
    NotFound,
    /// Text cannot be converted to bytes under the requested encoding
    Encoding,
    /// Read failure while streaming
    Io,
}

impl HasherError {
    /// Convert an I/O error, keeping `NotFound` distinct from other failures
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedAlgorithm(_)
            | Self::UnknownEncoding(_)
            | Self::InvalidChunkSize(_)
            | Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Encoding { .. } => ErrorKind::Encoding,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Check if this error is a permission issue
    pub fn is_permission_error(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(path) | Self::Io { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for FileHasher operations
pub type Result<T> = std::result::Result<T, HasherError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| HasherError::from_io(path, e))
    }
}

impl From<walkdir::Error> for HasherError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
        let message = err.to_string();
        match err.into_io_error() {
            Some(source) => HasherError::from_io(path, source),
            None => HasherError::Io {
                path,
                source: std::io::Error::new(std::io::ErrorKind::Other, message),
            },
        }
    }
}
