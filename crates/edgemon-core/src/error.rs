//! # Error Types
//!
//! Shared error type for the generator side of edgemon. Schema validation
//! has its own error enum in `edgemon-schema` so that violation details stay
//! structured.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for configuration, record and output failures.
#[derive(Error, Debug)]
pub enum EdgemonError {
    /// A configuration value was rejected at construction.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A timestamp string could not be accepted.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// JSON serialization of a record failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A serialized record was not valid UTF-8.
    #[error("record is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Reading or writing a file failed. Never retried.
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// File the operation was targeting.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A built-in smoke test invariant did not hold.
    #[error("self-test failed: {0}")]
    SelfTest(String),
}

impl EdgemonError {
    /// Wrap an IO error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
