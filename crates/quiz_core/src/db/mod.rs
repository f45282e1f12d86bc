//! SQLite storage bootstrap, schema migrations and write outcomes.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the quiz store.
//! - Apply schema migrations in deterministic order.
//! - Translate raw engine results into structured write outcomes.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - Core code must not read/write content before migrations succeed.
//! - Repositories never inspect engine error codes; see [`outcome`].

use thiserror::Error;

pub mod migrations;
mod open;
pub mod outcome;

pub use open::{open_db, open_db_in_memory};
pub use outcome::{insert_row, WriteOutcome};

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure. Propagated to callers unmodified.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}
