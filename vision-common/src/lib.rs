//! Vision Common - Shared types, configuration, and utilities for the Vision backend.
//!
//! This crate provides:
//! - Configuration loading from the environment (and an optional `.env` file)
//! - Configuration validation
//! - The unified error type used by the transcription service
//! - Logging setup
//! - The `Transcript` domain entity

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod logging;
pub mod transcript;
pub mod validation;

pub use config::{
    Config, DatabaseConfig, ObservabilityConfig, SecretsConfig, ServerConfig, TranscriptionConfig,
};
pub use error::{Error, Result};
pub use transcript::{NewTranscript, Transcript, TranscriptListItem, TranscriptStatus};
pub use validation::{Validate, ValidationError, ValidationResult};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::logging::init_logging;
    pub use crate::transcript::{NewTranscript, Transcript, TranscriptStatus};
}
