//! Configuration module for FileHasher
//!
//! Provides the supported algorithm set, hasher settings and CLI arguments.

mod settings;

pub use settings::*;
