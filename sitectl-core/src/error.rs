//! Structured error types for sitectl-core.
//!
//! Library consumers get `thiserror` enums; the `sitectl` binary wraps them
//! in `anyhow` with context.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sitectl-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Config file could not be parsed
    #[error("Invalid config file {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Result type alias for sitectl-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
