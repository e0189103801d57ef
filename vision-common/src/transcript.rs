//! The `Transcript` domain entity.
//!
//! These types carry no storage concerns; `vision-store` owns the mapping
//! between rows and these structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal outcome of a single transcription attempt.
///
/// Set once when the record is created and never changed afterward. A retry
/// produces a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptStatus {
    Completed,
    Failed,
}

impl TranscriptStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TranscriptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TranscriptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown transcript status: {other}")),
        }
    }
}

/// A persisted transcription record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Generated at creation
    pub id: Uuid,
    /// Filename as supplied by the caller
    pub source_filename: String,
    /// Audio length; always 0 until duration analysis exists
    pub duration_seconds: u32,
    /// Transcribed text; empty when the attempt failed
    pub raw_text: String,
    pub status: TranscriptStatus,
    /// Assigned by the database at insert
    pub created_at: DateTime<Utc>,
}

/// Data needed to create a transcript. Server-generated fields are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTranscript {
    pub source_filename: String,
    pub duration_seconds: u32,
    pub raw_text: String,
    pub status: TranscriptStatus,
}

impl NewTranscript {
    /// A successful attempt.
    pub fn completed(
        source_filename: impl Into<String>,
        duration_seconds: u32,
        raw_text: impl Into<String>,
    ) -> Self {
        Self {
            source_filename: source_filename.into(),
            duration_seconds,
            raw_text: raw_text.into(),
            status: TranscriptStatus::Completed,
        }
    }

    /// A failed attempt, recorded with empty text.
    pub fn failed(source_filename: impl Into<String>, duration_seconds: u32) -> Self {
        Self {
            source_filename: source_filename.into(),
            duration_seconds,
            raw_text: String::new(),
            status: TranscriptStatus::Failed,
        }
    }
}

/// Listing projection without the (potentially large) text body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptListItem {
    pub id: Uuid,
    pub source_filename: String,
    pub duration_seconds: u32,
    pub status: TranscriptStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Transcript> for TranscriptListItem {
    fn from(t: Transcript) -> Self {
        Self {
            id: t.id,
            source_filename: t.source_filename,
            duration_seconds: t.duration_seconds,
            status: t.status,
            created_at: t.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_display_and_parse() {
        assert_eq!(TranscriptStatus::Completed.to_string(), "completed");
        assert_eq!(TranscriptStatus::Failed.to_string(), "failed");
        assert_eq!("COMPLETED".parse::<TranscriptStatus>(), Ok(TranscriptStatus::Completed));
        assert_eq!("failed".parse::<TranscriptStatus>(), Ok(TranscriptStatus::Failed));
        assert!("pending".parse::<TranscriptStatus>().is_err());
    }

    #[test]
    fn status_serialization() {
        let json = serde_json::to_string(&TranscriptStatus::Failed).unwrap();
        assert_eq!(json, "\"failed\"");

        let parsed: TranscriptStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(parsed, TranscriptStatus::Completed);
    }

    #[test]
    fn failed_record_has_empty_text() {
        let new = NewTranscript::failed("clip.wav", 0);
        assert_eq!(new.status, TranscriptStatus::Failed);
        assert!(new.raw_text.is_empty());
    }

    #[test]
    fn list_item_drops_text() {
        let transcript = Transcript {
            id: Uuid::new_v4(),
            source_filename: "clip.wav".into(),
            duration_seconds: 0,
            raw_text: "hello".into(),
            status: TranscriptStatus::Completed,
            created_at: Utc::now(),
        };
        let item = TranscriptListItem::from(transcript.clone());
        assert_eq!(item.id, transcript.id);

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("raw_text").is_none());
        assert_eq!(json["status"], "completed");
    }
}
