//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.
//!
//! Only argument validation and the dump command can fail. Lookups of unknown
//! keys or maps are reported as `None`/`false`, never as errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A required argument was missing or out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The dump file could not be created or written
    #[error("Cannot write dump file {}: {source}", path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    /// Shorthand for an [`CacheError::InvalidArgument`] naming the offending field.
    pub fn empty(field: &str) -> Self {
        CacheError::InvalidArgument(format!("{} cannot be empty", field))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
