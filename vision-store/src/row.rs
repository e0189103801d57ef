//! Mapping between `transcripts` rows and the domain types.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;
use vision_common::{Transcript, TranscriptListItem, TranscriptStatus};

/// Column list shared by every query returning a full transcript.
pub(crate) const TRANSCRIPT_COLUMNS: &str =
    "id, source_filename, duration_seconds, raw_text, status, created_at";

/// Column list for the listing projection.
pub(crate) const LIST_ITEM_COLUMNS: &str =
    "id, source_filename, duration_seconds, status, created_at";

/// Map a row selected with `TRANSCRIPT_COLUMNS`.
pub(crate) fn map_transcript(row: &Row<'_>) -> rusqlite::Result<Transcript> {
    Ok(Transcript {
        id: parse_uuid(row, 0)?,
        source_filename: row.get(1)?,
        duration_seconds: row.get(2)?,
        raw_text: row.get(3)?,
        status: parse_status(row, 4)?,
        created_at: parse_timestamp(row, 5)?,
    })
}

/// Map a row selected with `LIST_ITEM_COLUMNS`.
pub(crate) fn map_list_item(row: &Row<'_>) -> rusqlite::Result<TranscriptListItem> {
    Ok(TranscriptListItem {
        id: parse_uuid(row, 0)?,
        source_filename: row.get(1)?,
        duration_seconds: row.get(2)?,
        status: parse_status(row, 3)?,
        created_at: parse_timestamp(row, 4)?,
    })
}

fn parse_uuid(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn parse_status(row: &Row<'_>, idx: usize) -> rusqlite::Result<TranscriptStatus> {
    let raw: String = row.get(idx)?;
    raw.parse::<TranscriptStatus>()
        .map_err(|reason| conversion_error(idx, std::io::Error::new(std::io::ErrorKind::InvalidData, reason)))
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}
