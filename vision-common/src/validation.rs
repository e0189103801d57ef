//! Configuration validation.
//!
//! Every section is checked and all problems are reported together, so a
//! misconfigured deployment fails once with the full list.

use std::net::IpAddr;
use thiserror::Error;

use crate::config::{Config, DatabaseConfig, ObservabilityConfig, SecretsConfig, ServerConfig, TranscriptionConfig};

/// Configuration validation error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid port {port} for {field}: must be between 1 and 65535")]
    InvalidPort { port: u16, field: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Multiple validation errors: {0:?}")]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Trait for validatable configuration sections.
pub trait Validate {
    /// Validate this configuration section.
    fn validate(&self) -> ValidationResult<()>;
}

impl Config {
    /// Validate the entire configuration.
    pub fn validate(&self) -> ValidationResult<()> {
        let sections: [&dyn Validate; 5] = [
            &self.secrets,
            &self.database,
            &self.server,
            &self.transcription,
            &self.observability,
        ];

        let mut errors: Vec<ValidationError> = sections
            .iter()
            .filter_map(|section| section.validate().err())
            .flat_map(|e| match e {
                ValidationError::Multiple(inner) => inner,
                other => vec![other],
            })
            .collect();

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

impl Validate for SecretsConfig {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();
        if self.groq_api_key.is_empty() {
            errors.push(ValidationError::MissingField {
                field: "GROQ_API_KEY".into(),
            });
        }
        if self.gemini_api_key.is_empty() {
            errors.push(ValidationError::MissingField {
                field: "GEMINI_API_KEY".into(),
            });
        }

        match errors.len() {
            0 => Ok(()),
            1 => Err(errors.remove(0)),
            _ => Err(ValidationError::Multiple(errors)),
        }
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingField {
                field: "DATABASE_URL".into(),
            });
        }
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> ValidationResult<()> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort {
                port: self.port,
                field: "VISION_PORT".into(),
            });
        }
        if self.host.parse::<IpAddr>().is_err() {
            return Err(ValidationError::InvalidValue {
                field: "VISION_HOST".into(),
                reason: format!("'{}' is not an IP address", self.host),
            });
        }
        Ok(())
    }
}

impl Validate for TranscriptionConfig {
    fn validate(&self) -> ValidationResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidValue {
                field: "GROQ_BASE_URL".into(),
                reason: "must start with http:// or https://".into(),
            });
        }
        if self.model.is_empty() {
            return Err(ValidationError::MissingField {
                field: "GROQ_STT_MODEL".into(),
            });
        }
        Ok(())
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> ValidationResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "VISION_LOG_LEVEL".into(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            });
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.log_format.to_lowercase().as_str()) {
            return Err(ValidationError::InvalidValue {
                field: "VISION_LOG_FORMAT".into(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.secrets.groq_api_key = "gsk-test".into();
        config.secrets.gemini_api_key = "gem-test".into();
        config.database.url = "sqlite://vision.db".into();
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_default_config_missing_required() {
        let result = Config::default().validate();
        match result {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 3);
                let fields: Vec<String> = errors
                    .iter()
                    .filter_map(|e| match e {
                        ValidationError::MissingField { field } => Some(field.clone()),
                        _ => None,
                    })
                    .collect();
                assert!(fields.contains(&"GROQ_API_KEY".to_string()));
                assert!(fields.contains(&"GEMINI_API_KEY".to_string()));
                assert!(fields.contains(&"DATABASE_URL".to_string()));
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_database_url_alone() {
        let mut config = valid_config();
        config.database.url.clear();
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ValidationError::MissingField { ref field }) if field == "DATABASE_URL"
        ));
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidPort { port: 0, .. })
        ));
    }

    #[test]
    fn test_bad_host_rejected() {
        let mut config = valid_config();
        config.server.host = "not a host".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = valid_config();
        config.observability.log_format = "xml".into();
        let result = config.validate();
        if let Err(ValidationError::InvalidValue { field, .. }) = result {
            assert_eq!(field, "VISION_LOG_FORMAT");
        } else {
            panic!("expected invalid value");
        }
    }

    #[test]
    fn test_base_url_scheme() {
        let mut config = valid_config();
        config.transcription.base_url = "api.groq.com".into();
        assert!(config.validate().is_err());
    }
}
