//! Groq Whisper client over the OpenAI-compatible transcription API.

use crate::error::SttError;
use crate::traits::{AudioUpload, SpeechToText};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Default API root for Groq's OpenAI-compatible endpoints.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default Whisper model.
pub const DEFAULT_MODEL: &str = "whisper-large-v3-turbo";

/// Speech-to-text against Groq (or any OpenAI-compatible provider).
///
/// Requests are deterministic: `temperature=0`, plain-text response, and no
/// `language` field so the provider auto-detects it. No client-side timeout
/// is set; a slow provider holds the caller for the full round-trip.
pub struct GroqStt {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GroqStt {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `api_key` - Provider API key, sent as a bearer token
    /// * `base_url` - API root, e.g. `https://api.groq.com/openai/v1`
    /// * `model` - Model name (default: "whisper-large-v3-turbo")
    pub fn new(api_key: String, base_url: String, model: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            api_key,
            client: Client::builder()
                // Some OpenAI-compatible servers mishandle multipart over HTTP/2
                .http1_only()
                .build()
                .unwrap_or_else(|_| Client::new()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url,
        }
    }

    /// Client for the public Groq endpoint with the default model.
    pub fn with_defaults(api_key: String) -> Self {
        Self::new(api_key, DEFAULT_BASE_URL.to_string(), None)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url)
    }

    fn build_form(&self, upload: AudioUpload<'_>) -> Result<Form, SttError> {
        let part = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.filename.to_string())
            .mime_str(upload.mime_type)
            .map_err(|e| {
                SttError::InvalidRequest(format!("bad MIME type '{}': {e}", upload.mime_type))
            })?;

        Ok(Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "text")
            .text("temperature", "0"))
    }
}

#[async_trait]
impl SpeechToText for GroqStt {
    fn name(&self) -> &str {
        "groq"
    }

    async fn transcribe(&self, upload: AudioUpload<'_>) -> Result<String, SttError> {
        let form = self.build_form(upload)?;
        let url = self.endpoint();

        tracing::debug!(
            url = %url,
            model = %self.model,
            filename = %upload.filename,
            mime_type = %upload.mime_type,
            bytes = upload.bytes.len(),
            "Sending STT request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                filename = %upload.filename,
                error = %body,
                "STT API error"
            );
            return Err(SttError::Api {
                status: status.as_u16(),
                body,
            });
        }

        // response_format=text returns the transcript as the raw body
        let text = response.text().await?;
        tracing::debug!(chars = text.len(), "STT transcription received");
        Ok(text)
    }
}
