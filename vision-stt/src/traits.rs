//! Core speech-to-text trait and request type.

use crate::error::SttError;
use async_trait::async_trait;

/// An audio file as handed to a speech-to-text backend.
#[derive(Debug, Clone, Copy)]
pub struct AudioUpload<'a> {
    pub bytes: &'a [u8],
    pub filename: &'a str,
    pub mime_type: &'a str,
}

impl<'a> AudioUpload<'a> {
    pub fn new(bytes: &'a [u8], filename: &'a str, mime_type: &'a str) -> Self {
        Self {
            bytes,
            filename,
            mime_type,
        }
    }
}

/// Trait for speech-to-text backends.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Backend name (e.g., "groq")
    fn name(&self) -> &str;

    /// Transcribe one audio file and return the provider's text as-is.
    ///
    /// Implementations make a single attempt; retrying is the caller's call.
    async fn transcribe(&self, upload: AudioUpload<'_>) -> Result<String, SttError>;
}
