//! Store error type.

use thiserror::Error;

/// Errors raised by `TranscriptStore`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The connection string does not name a SQLite database
    #[error("Unsupported database URL: {0}")]
    UnsupportedUrl(String),

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking task running the query panicked or was cancelled
    #[error("Database task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<StoreError> for vision_common::Error {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnsupportedUrl(reason) => Self::Config(reason),
            other => Self::storage_failed(other),
        }
    }
}
