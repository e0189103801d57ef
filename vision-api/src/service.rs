//! Transcription orchestration: validate, call the provider, persist the outcome.

use crate::validation::validate_audio;
use std::sync::Arc;
use uuid::Uuid;
use vision_common::{Error, NewTranscript, Result, Transcript};
use vision_store::TranscriptStore;
use vision_stt::{AudioUpload, SpeechToText};

/// Audio length in seconds.
///
/// Not yet implemented: always returns 0 until real duration analysis is
/// added. Stored records carry this placeholder.
pub fn audio_duration_seconds(_audio_bytes: &[u8]) -> u32 {
    0
}

/// Coordinates validation, the speech-to-text call, and persistence.
///
/// Every attempt that reaches the provider leaves exactly one row behind,
/// `completed` or `failed`. Nothing is retried.
#[derive(Clone)]
pub struct TranscriptionService {
    stt: Arc<dyn SpeechToText>,
    store: TranscriptStore,
}

impl TranscriptionService {
    pub fn new(stt: Arc<dyn SpeechToText>, store: TranscriptStore) -> Self {
        Self { stt, store }
    }

    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Transcribe and persist, returning the new record's id and text.
    pub async fn transcribe_and_store(
        &self,
        filename: &str,
        audio_bytes: &[u8],
        mime_type: &str,
    ) -> Result<(Uuid, String)> {
        let transcript = self.transcribe(filename, audio_bytes, mime_type).await?;
        Ok((transcript.id, transcript.raw_text))
    }

    /// Transcribe and persist, returning the full stored record.
    ///
    /// # Errors
    /// - `InvalidInput` for empty or oversized audio; nothing is called or written
    /// - `TranscriptionFailed` when the provider fails; a `failed` row is written first
    /// - `StorageFailed` when the row cannot be written
    pub async fn transcribe(
        &self,
        filename: &str,
        audio_bytes: &[u8],
        mime_type: &str,
    ) -> Result<Transcript> {
        tracing::info!(filename, bytes = audio_bytes.len(), "Starting transcription");

        validate_audio(audio_bytes, filename)?;

        let duration_seconds = audio_duration_seconds(audio_bytes);
        let upload = AudioUpload::new(audio_bytes, filename, mime_type);

        let raw_text = match self.stt.transcribe(upload).await {
            Ok(text) => text,
            Err(api_error) => {
                tracing::error!(
                    filename,
                    provider = self.stt.name(),
                    error = %api_error,
                    "Transcription failed"
                );

                let failed = NewTranscript::failed(filename, duration_seconds);
                let record = self.store.create_transcript(failed).await.map_err(|e| {
                    tracing::error!(filename, error = %e, "Could not record failed transcription");
                    Error::from(e)
                })?;
                tracing::info!(transcript_id = %record.id, "Recorded failed transcription");

                return Err(Error::transcription_failed(filename, api_error));
            }
        };

        let text = raw_text.trim();
        if text.is_empty() {
            tracing::warn!(filename, "Empty transcription result");
        }

        let completed = NewTranscript::completed(filename, duration_seconds, text);
        let record = self.store.create_transcript(completed).await.map_err(|e| {
            tracing::error!(filename, error = %e, "Database error while storing transcript");
            Error::from(e)
        })?;

        tracing::info!(
            transcript_id = %record.id,
            filename,
            chars = record.raw_text.len(),
            "Transcript stored"
        );

        Ok(record)
    }
}
