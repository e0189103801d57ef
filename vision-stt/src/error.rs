use thiserror::Error;

/// Errors returned by a speech-to-text backend.
#[derive(Debug, Error)]
pub enum SttError {
    /// The request never produced a response (DNS, TLS, connection reset, ...)
    #[error("STT request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("STT API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The upload could not be encoded
    #[error("Invalid STT request: {0}")]
    InvalidRequest(String),
}

impl SttError {
    /// HTTP status returned by the provider, if it answered.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
