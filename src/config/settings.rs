//! Configuration settings for FileHasher
//!
//! Defines CLI arguments, the supported algorithm set and the defaults
//! used by [`crate::hash::FileHasher`].

use crate::error::{HasherError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Bytes read per I/O call when no chunk size is given
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Largest read buffer ever allocated; bigger chunk sizes are clamped
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// FileHasher - compute and verify file checksums
#[derive(Parser, Debug, Clone)]
#[command(name = "filehasher")]
#[command(author = "FileHasher Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compute and verify file checksums (MD5, SHA1, SHA256, SHA512)")]
#[command(long_about = r#"
FileHasher streams files through a digest in bounded-size chunks, so even
very large files are hashed without being loaded into memory.

Examples:
  filehasher document.pdf                  # SHA256 of a file
  filehasher document.pdf md5              # MD5 of a file
  filehasher sums ./release --json         # checksums for a whole tree
  filehasher verify image.iso 2cf24d...    # compare with an expected digest
  filehasher string "hello" -a sha1        # hash a text value
"#)]
pub struct CliArgs {
    /// File to hash
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Algorithm name (md5, sha1, sha256, sha512)
    #[arg(value_name = "ALGORITHM")]
    pub algorithm: Option<String>,

    /// Read chunk size (e.g., 8K, 1M)
    #[arg(short = 'c', long, global = true, value_name = "SIZE")]
    pub chunk_size: Option<String>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress logging below errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute checksums for every regular file below a directory
    #[command(name = "sums")]
    Sums {
        /// Directory to walk
        directory: PathBuf,
        /// Hash algorithm
        #[arg(short, long, value_enum, default_value = "sha256")]
        algorithm: HashAlgorithm,
        /// Emit JSON instead of `<digest>  <path>` lines
        #[arg(long)]
        json: bool,
    },

    /// Verify a file against an expected digest
    #[command(name = "verify")]
    Verify {
        /// File to check
        file: PathBuf,
        /// Expected hex digest (case-insensitive)
        expected: String,
        /// Hash algorithm
        #[arg(short, long, value_enum, default_value = "sha256")]
        algorithm: HashAlgorithm,
    },

    /// Hash a text value
    #[command(name = "string")]
    Str {
        /// Text to hash
        text: String,
        /// Hash algorithm
        #[arg(short, long, value_enum, default_value = "sha256")]
        algorithm: HashAlgorithm,
        /// Text encoding (utf-8, utf-16, utf-16-le, utf-16-be, ascii, latin-1)
        #[arg(short, long, default_value = "utf-8")]
        encoding: String,
    },

    /// List supported algorithms
    #[command(name = "list")]
    List,
}

/// Supported digest algorithms
#[derive(
    ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (128-bit, not collision resistant)
    #[value(name = "md5")]
    Md5,
    /// SHA-1 (160-bit, not collision resistant)
    #[value(name = "sha1")]
    Sha1,
    /// SHA-256 (256-bit)
    #[default]
    #[value(name = "sha256")]
    Sha256,
    /// SHA-512 (512-bit)
    #[value(name = "sha512")]
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm
    pub const ALL: [HashAlgorithm; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512];

    /// Get the output size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Length of the hex rendering of a digest
    pub fn hex_len(&self) -> usize {
        self.output_size() * 2
    }

    /// Upper-case display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }

    /// Canonical lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HasherError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(HasherError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Settings for a [`crate::hash::FileHasher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasherConfig {
    /// Digest algorithm
    pub algorithm: HashAlgorithm,
    /// Bytes per read while streaming files
    pub chunk_size: usize,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl HasherConfig {
    /// Create a configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(ref name) = args.algorithm {
            config.algorithm = name.parse()?;
        }

        if let Some(ref size) = args.chunk_size {
            let bytes = parse_size(size).map_err(HasherError::InvalidArgument)?;
            config.chunk_size = usize::try_from(bytes)
                .map_err(|_| HasherError::invalid_argument(format!("chunk size too large: {}", size)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject a zero chunk size
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(HasherError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }
}

/// Parse size string (e.g., "1M", "64K", "1G")
pub fn parse_size(size: &str) -> std::result::Result<u64, String> {
    let size = size.trim().to_uppercase();

    if size.is_empty() {
        return Err("Empty size string".to_string());
    }

    let (num_str, multiplier) = if size.ends_with("TB") || size.ends_with('T') {
        (size.trim_end_matches(|c| c == 'T' || c == 'B'), 1024u64 * 1024 * 1024 * 1024)
    } else if size.ends_with("GB") || size.ends_with('G') {
        (size.trim_end_matches(|c| c == 'G' || c == 'B'), 1024u64 * 1024 * 1024)
    } else if size.ends_with("MB") || size.ends_with('M') {
        (size.trim_end_matches(|c| c == 'M' || c == 'B'), 1024u64 * 1024)
    } else if size.ends_with("KB") || size.ends_with('K') {
        (size.trim_end_matches(|c| c == 'K' || c == 'B'), 1024u64)
    } else if size.ends_with('B') {
        (size.trim_end_matches('B'), 1u64)
    } else {
        (size.as_str(), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    if num < 0.0 {
        return Err(format!("Negative size: {}", num_str));
    }

    Ok((num * multiplier as f64) as u64)
}
