//! Common error types for tastetune

use thiserror::Error;

/// Common result type for tastetune operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the conversion pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Input source or a named sheet cannot be opened (fatal)
    #[error("Source unavailable: {source_name}: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// A required logical field has no matching physical column
    #[error("Required column missing: '{field}' (tried: {})", .candidates.join(", "))]
    RequiredColumnMissing {
        field: &'static str,
        candidates: Vec<&'static str>,
    },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Document serialization or parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub(crate) fn source_unavailable(
        source_name: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Error::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
