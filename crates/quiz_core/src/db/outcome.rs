//! Structured results for single-statement writes.
//!
//! Constraint failures are the only engine errors the repositories need to
//! tell apart, so they are classified here once and everything else is
//! carried through as [`WriteOutcome::Failed`].

use super::DbError;
use rusqlite::{ffi, Connection, ErrorCode, Params};

/// Tagged result of one storage write.
#[derive(Debug)]
pub enum WriteOutcome<T> {
    /// The write was applied.
    Written(T),
    /// A unique or primary key constraint rejected the row.
    Conflict,
    /// A referenced parent row does not exist.
    ForeignKeyViolation,
    /// Any other engine failure (busy, I/O, other constraints).
    Failed(DbError),
}

impl<T> WriteOutcome<T> {
    /// Classifies a raw engine result.
    pub fn from_result(result: rusqlite::Result<T>) -> Self {
        let err = match result {
            Ok(value) => return Self::Written(value),
            Err(err) => err,
        };

        let extended_code = match &err {
            rusqlite::Error::SqliteFailure(failure, _)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Some(failure.extended_code)
            }
            _ => None,
        };

        match extended_code {
            Some(ffi::SQLITE_CONSTRAINT_UNIQUE) | Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => {
                Self::Conflict
            }
            Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => Self::ForeignKeyViolation,
            _ => Self::Failed(DbError::Sqlite(err)),
        }
    }

    /// Returns `true` when the write was applied.
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Executes one INSERT and returns the storage-assigned row id.
pub fn insert_row<P: Params>(conn: &Connection, sql: &str, params: P) -> WriteOutcome<i64> {
    WriteOutcome::from_result(conn.execute(sql, params).map(|_| conn.last_insert_rowid()))
}
