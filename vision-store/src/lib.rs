//! Vision Store - SQLite persistence for transcripts.
//!
//! A single `transcripts` table with create, read, list, and count
//! operations. Records are never updated or deleted.
//!
//! Every operation opens its own connection on the blocking pool, runs in
//! one transaction, and drops the connection before returning:
//!
//! ```text
//! caller → spawn_blocking → open → BEGIN → query → COMMIT → close
//!                                     ↓ error
//!                                 ROLLBACK → StoreError
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod error;
mod row;
pub mod store;

pub use error::StoreError;
pub use store::{parse_database_url, TranscriptStore};
