//! Configuration for the Vision backend.
//!
//! Configuration is read once at startup from the process environment. A
//! `.env` file in the working directory is loaded first when present;
//! variables already set in the environment win over the file.
//!
//! # Environment Variable Mapping
//!
//! ## Required
//! - `GROQ_API_KEY` → secrets.groq_api_key
//! - `GEMINI_API_KEY` → secrets.gemini_api_key
//! - `DATABASE_URL` → database.url
//!
//! ## Optional
//! - `VISION_HOST` → server.host (default `127.0.0.1`)
//! - `VISION_PORT` → server.port (default `8000`)
//! - `GROQ_BASE_URL` → transcription.base_url
//! - `GROQ_STT_MODEL` → transcription.model
//! - `VISION_LOG_LEVEL` → observability.log_level
//! - `VISION_LOG_FORMAT` → observability.log_format

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default Groq OpenAI-compatible API root.
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default Whisper model served by Groq.
pub const DEFAULT_STT_MODEL: &str = "whisper-large-v3-turbo";

// ============================================================================
// Server
// ============================================================================

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8000
}

// ============================================================================
// Secrets
// ============================================================================

/// Provider API keys.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// Key for the speech-to-text provider
    pub groq_api_key: String,
    /// Key for the secondary AI provider (not used by transcription)
    pub gemini_api_key: String,
}

impl std::fmt::Debug for SecretsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretsConfig")
            .field("groq_api_key", &redact(&self.groq_api_key))
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

// ============================================================================
// Database
// ============================================================================

/// Relational store configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `sqlite://data/vision.db`
    pub url: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Connection strings may embed credentials
        f.debug_struct("DatabaseConfig")
            .field("url", &redact(&self.url))
            .finish()
    }
}

// ============================================================================
// Transcription
// ============================================================================

/// Speech-to-text endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_GROQ_BASE_URL.into()
}

fn default_model() -> String {
    DEFAULT_STT_MODEL.into()
}

// ============================================================================
// Observability
// ============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

// ============================================================================
// Root
// ============================================================================

/// Root configuration, built once in `main` and passed to components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub transcription: TranscriptionConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load `.env` (if present) and the environment, then validate.
    ///
    /// Fails when a required variable is missing or a value is malformed.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => anyhow::bail!("Failed to read .env file: {e}"),
        }

        let config = Self::from_env();
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
        Ok(config)
    }

    /// Build from the process environment without validating.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup without validating.
    ///
    /// Missing required values are left empty and reported by `validate`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());
        let mut config = Self::default();

        config.secrets.groq_api_key = get("GROQ_API_KEY").unwrap_or_default();
        config.secrets.gemini_api_key = get("GEMINI_API_KEY").unwrap_or_default();
        config.database.url = get("DATABASE_URL").unwrap_or_default();

        if let Some(host) = get("VISION_HOST").filter(|v| !v.is_empty()) {
            config.server.host = host;
        }
        if let Some(port) = get("VISION_PORT") {
            // An unparseable port becomes 0 so validation rejects it
            config.server.port = port.parse().unwrap_or(0);
        }
        if let Some(url) = get("GROQ_BASE_URL").filter(|v| !v.is_empty()) {
            config.transcription.base_url = url;
        }
        if let Some(model) = get("GROQ_STT_MODEL").filter(|v| !v.is_empty()) {
            config.transcription.model = model;
        }
        if let Some(level) = get("VISION_LOG_LEVEL").filter(|v| !v.is_empty()) {
            config.observability.log_level = level;
        }
        if let Some(format) = get("VISION_LOG_FORMAT").filter(|v| !v.is_empty()) {
            config.observability.log_format = format;
        }

        config
    }

    /// Socket address string for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_required_and_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "gsk-test"),
            ("GEMINI_API_KEY", "gem-test"),
            ("DATABASE_URL", "sqlite://vision.db"),
        ]));

        assert_eq!(config.secrets.groq_api_key, "gsk-test");
        assert_eq!(config.secrets.gemini_api_key, "gem-test");
        assert_eq!(config.database.url, "sqlite://vision.db");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.transcription.base_url, DEFAULT_GROQ_BASE_URL);
        assert_eq!(config.transcription.model, DEFAULT_STT_MODEL);
        assert_eq!(config.observability.log_format, "pretty");
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn optional_overrides_apply() {
        let config = Config::from_lookup(lookup_from(&[
            ("VISION_HOST", "0.0.0.0"),
            ("VISION_PORT", "9090"),
            ("GROQ_BASE_URL", "http://localhost:9999/v1"),
            ("GROQ_STT_MODEL", "whisper-large-v3"),
            ("VISION_LOG_LEVEL", "debug"),
            ("VISION_LOG_FORMAT", "json"),
        ]));

        assert_eq!(config.bind_address(), "0.0.0.0:9090");
        assert_eq!(config.transcription.base_url, "http://localhost:9999/v1");
        assert_eq!(config.transcription.model, "whisper-large-v3");
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, "json");
    }

    #[test]
    fn bad_port_becomes_zero() {
        let config = Config::from_lookup(lookup_from(&[("VISION_PORT", "eighty")]));
        assert_eq!(config.server.port, 0);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", "gsk-very-secret"),
            ("DATABASE_URL", "postgres://user:pw@host/db"),
        ]));
        let printed = format!("{config:?}");
        assert!(!printed.contains("gsk-very-secret"));
        assert!(!printed.contains("pw@host"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("<unset>"));
    }
}
