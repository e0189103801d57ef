//! Error types for the Vision backend.

use thiserror::Error;

/// Result type alias using the Vision error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by the wrapping variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for the transcription service.
#[derive(Error, Debug)]
pub enum Error {
    /// Empty or oversized upload; raised before any side effect
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external transcription API failed; a failed record was persisted
    #[error("Transcription failed for '{filename}': {source}")]
    TranscriptionFailed {
        filename: String,
        #[source]
        source: BoxError,
    },

    /// The database rejected a read or write
    #[error("Storage failed: {source}")]
    StorageFailed {
        #[source]
        source: BoxError,
    },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an API error raised while transcribing `filename`.
    pub fn transcription_failed(
        filename: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::TranscriptionFailed {
            filename: filename.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a database error.
    pub fn storage_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::StorageFailed {
            source: Box::new(source),
        }
    }

    /// Check if this is an input validation error.
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Get HTTP status code for this error.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::TranscriptionFailed { .. } => 502,
            _ => 500,
        }
    }

    /// Machine-readable error code for API responses.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::TranscriptionFailed { .. } => "transcription_failed",
            Self::StorageFailed { .. } => "storage_failed",
            Self::NotFound(_) => "not_found",
            Self::Config(_) => "config_error",
            Self::Internal(_) | Self::Io(_) | Self::Json(_) => "internal_error",
        }
    }
}
