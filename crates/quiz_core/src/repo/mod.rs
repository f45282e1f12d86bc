//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Expose validated create/read operations per entity family.
//! - Isolate SQL and constraint handling from callers.
//! - Return reconstructed entities, never raw storage rows.
//!
//! # Invariants
//! - Write paths run `crate::validation` rules before SQL mutations.
//! - Uniqueness and references are enforced by storage constraints; no
//!   pre-check-then-insert is performed.
//! - Single-entity lookups report absence as `Ok(None)`, not as an error.
//! - Repositories hold no state beyond the injected connection.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::validation::ValidationError;
use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub mod admin_repo;
pub mod question_repo;
pub mod theme_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity family named in conflict/not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Admin,
    Theme,
    Question,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Admin => "admin",
            Self::Theme => "theme",
            Self::Question => "question",
        };
        f.write_str(name)
    }
}

/// Coarse classification handed to the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Storage,
}

#[derive(Debug, Error)]
pub enum RepoError {
    /// Caller input violates a content rule. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A uniqueness constraint rejected the write.
    #[error("{entity} already exists: `{key}`")]
    Conflict { entity: EntityKind, key: String },
    /// A referenced parent entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },
    #[error(transparent)]
    Db(#[from] DbError),
    /// Persisted rows cannot be turned into a valid entity.
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error("repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
    #[error("repository requires column `{column}` in table `{table}`")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Db(_)
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => ErrorKind::Storage,
        }
    }

    /// Status code an HTTP layer should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::NotFound => 404,
            ErrorKind::Storage => 500,
        }
    }
}

/// Required table and the columns a repository reads or writes in it.
pub(crate) type TableShape = (&'static str, &'static [&'static str]);

/// Verifies the connection is migrated and carries the expected tables.
pub(crate) fn ensure_connection_ready(conn: &Connection, tables: &[TableShape]) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in tables {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityKind, ErrorKind, RepoError};
    use crate::db::DbError;
    use crate::validation::ValidationError;

    #[test]
    fn http_status_follows_error_kind() {
        let validation = RepoError::from(ValidationError::CorrectAnswerCount { actual: 0 });
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(validation.http_status(), 400);

        let conflict = RepoError::Conflict {
            entity: EntityKind::Theme,
            key: "Sports".to_string(),
        };
        assert_eq!(conflict.http_status(), 409);
        assert_eq!(conflict.to_string(), "theme already exists: `Sports`");

        let not_found = RepoError::NotFound {
            entity: EntityKind::Theme,
            id: 999,
        };
        assert_eq!(not_found.http_status(), 404);
        assert_eq!(not_found.to_string(), "theme not found: 999");

        let storage = RepoError::Db(DbError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 1,
        });
        assert_eq!(storage.kind(), ErrorKind::Storage);
        assert_eq!(storage.http_status(), 500);
    }
}
