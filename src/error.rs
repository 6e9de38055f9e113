//! Error types for quantscan.

use thiserror::Error;

/// Result type for quantscan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for quantscan operations.
///
/// Per-token failures (a numeral span that fails to parse) are recovered
/// inside the extractor and never surface here; only run-level conditions
/// do.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The document source yielded no text at all.
    #[error("document source yielded no text")]
    NoText,

    /// Pipeline configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }
}
