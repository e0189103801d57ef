//! SQLite-backed transcript store.

use crate::error::StoreError;
use crate::row::{map_list_item, map_transcript, LIST_ITEM_COLUMNS, TRANSCRIPT_COLUMNS};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;
use vision_common::{NewTranscript, Transcript, TranscriptListItem};

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve a `DATABASE_URL` into a SQLite file path.
///
/// Accepts `sqlite://<path>`, `sqlite:<path>`, or a bare path. Other schemes
/// are rejected, as is `:memory:` since each operation opens a fresh
/// connection and an in-memory database would not outlive it.
pub fn parse_database_url(url: &str) -> Result<PathBuf, StoreError> {
    let url = url.trim();
    let path = if let Some(rest) = url.strip_prefix("sqlite://") {
        rest
    } else if let Some(rest) = url.strip_prefix("sqlite:") {
        rest
    } else if let Some((scheme, _)) = url.split_once("://") {
        return Err(StoreError::UnsupportedUrl(format!(
            "scheme '{scheme}' is not supported, expected sqlite://<path>"
        )));
    } else {
        url
    };

    if path.is_empty() {
        return Err(StoreError::UnsupportedUrl("database path is empty".into()));
    }
    if path == ":memory:" {
        return Err(StoreError::UnsupportedUrl(
            "in-memory databases are not supported".into(),
        ));
    }

    Ok(PathBuf::from(path))
}

/// Transcript persistence over a SQLite file.
///
/// Cloning is cheap; clones share nothing but the path.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    db_path: PathBuf,
}

impl TranscriptStore {
    /// Open the store named by a `DATABASE_URL`.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        let path = parse_database_url(url)?;
        Self::new(&path)
    }

    /// Open (creating if needed) the store at `db_path` and apply the schema.
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = open_connection(db_path)?;
        conn.execute_batch(include_str!("schema.sql"))?;

        tracing::info!(path = %db_path.display(), "Transcript store ready");

        Ok(Self {
            db_path: db_path.to_path_buf(),
        })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Insert one transcript and return it with its generated id and timestamp.
    pub async fn create_transcript(&self, new: NewTranscript) -> Result<Transcript, StoreError> {
        let id = Uuid::new_v4();

        self.with_transaction("create_transcript", move |tx| {
            tx.query_row(
                &format!(
                    "INSERT INTO transcripts (id, source_filename, duration_seconds, raw_text, status)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     RETURNING {TRANSCRIPT_COLUMNS}"
                ),
                params![
                    id.to_string(),
                    new.source_filename,
                    new.duration_seconds,
                    new.raw_text,
                    new.status.as_str(),
                ],
                map_transcript,
            )
        })
        .await
    }

    /// Fetch a transcript by id. A missing row is `Ok(None)`.
    pub async fn get_transcript_by_id(&self, id: Uuid) -> Result<Option<Transcript>, StoreError> {
        self.with_transaction("get_transcript_by_id", move |tx| {
            tx.query_row(
                &format!("SELECT {TRANSCRIPT_COLUMNS} FROM transcripts WHERE id = ?1"),
                params![id.to_string()],
                map_transcript,
            )
            .optional()
        })
        .await
    }

    /// List transcripts newest first, skipping `skip` and returning at most `limit`.
    pub async fn list_transcripts(&self, skip: u32, limit: u32) -> Result<Vec<Transcript>, StoreError> {
        self.with_transaction("list_transcripts", move |tx| {
            let mut stmt = tx.prepare(&format!(
                "SELECT {TRANSCRIPT_COLUMNS} FROM transcripts
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?1 OFFSET ?2"
            ))?;
            let rows = stmt.query_map(params![limit, skip], map_transcript)?;
            let transcripts = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(transcripts)
        })
        .await
    }

    /// Same ordering and paging as `list_transcripts`, without the text body.
    pub async fn list_transcript_items(
        &self,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<TranscriptListItem>, StoreError> {
        self.with_transaction("list_transcript_items", move |tx| {
            let mut stmt = tx.prepare(&format!(
                "SELECT {LIST_ITEM_COLUMNS} FROM transcripts
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?1 OFFSET ?2"
            ))?;
            let rows = stmt.query_map(params![limit, skip], map_list_item)?;
            let items = rows.collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(items)
        })
        .await
    }

    /// Total number of transcripts.
    pub async fn count_transcripts(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .with_transaction("count_transcripts", |tx| {
                tx.query_row("SELECT COUNT(*) FROM transcripts", [], |row| row.get(0))
            })
            .await?;
        Ok(count.max(0) as u64)
    }

    /// Health check: returns true if the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        self.with_transaction("health_check", |tx| {
            tx.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        })
        .await
        .is_ok()
    }

    /// Run `f` inside a transaction on a fresh connection.
    ///
    /// The transaction commits only when `f` succeeds; otherwise it is
    /// dropped, which rolls it back. The connection closes before this
    /// returns in every case.
    async fn with_transaction<T, F>(&self, operation: &'static str, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Transaction<'_>) -> rusqlite::Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        let result = match tokio::task::spawn_blocking(move || -> Result<T, StoreError> {
            let mut conn = open_connection(&db_path)?;
            let tx = conn.transaction()?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
        {
            Ok(result) => result,
            Err(join_error) => Err(StoreError::from(join_error)),
        };

        if let Err(ref e) = result {
            tracing::error!(operation, error = %e, "Transcript store operation failed");
        }

        result
    }
}

fn open_connection(db_path: &Path) -> Result<Connection, StoreError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}
