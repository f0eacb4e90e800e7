//! Structured error types for fabsave-core.
//!
//! The binary wraps these in `anyhow` for context, but everything the saver
//! can fail on is one of the variants below.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for save operations
#[derive(Error, Debug)]
pub enum SaveError {
    /// Missing or invalid environment setting, or unusable output directory
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// The caller did not supply a usable stub
    #[error("Usage error: {reason}")]
    Usage { reason: String },

    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Result type alias for fabsave-core operations
pub type Result<T> = std::result::Result<T, SaveError>;

impl SaveError {
    /// Create a configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Create a usage error
    pub fn usage(reason: impl Into<String>) -> Self {
        Self::Usage {
            reason: reason.into(),
        }
    }

    /// Output directory is missing or not a directory
    pub fn missing_directory(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::configuration(format!(
            "output directory {:?} does not exist or is not a directory",
            path
        ))
    }
}
