//! Theme repository contract and SQLite implementation.
//!
//! # Invariants
//! - Theme titles are unique; duplicates surface as `RepoError::Conflict`.
//! - Listing order is insertion order (`id ASC`).

use crate::db::outcome::{insert_row, WriteOutcome};
use crate::model::theme::{Theme, ThemeId};
use crate::repo::{ensure_connection_ready, EntityKind, RepoError, RepoResult, TableShape};
use crate::validation::validate_title;
use log::{info, warn};
use rusqlite::{Connection, OptionalExtension, Row};

const THEME_TABLES: &[TableShape] = &[("themes", &["id", "title"])];

/// Repository interface for theme operations.
pub trait ThemeRepository {
    /// Persists a new theme and returns it with its assigned id.
    fn create_theme(&self, title: &str) -> RepoResult<Theme>;
    fn get_theme_by_title(&self, title: &str) -> RepoResult<Option<Theme>>;
    fn get_theme_by_id(&self, id: ThemeId) -> RepoResult<Option<Theme>>;
    /// Returns every theme in insertion order.
    fn list_themes(&self) -> RepoResult<Vec<Theme>>;
}

/// SQLite-backed theme repository.
pub struct SqliteThemeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteThemeRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, THEME_TABLES)?;
        Ok(Self { conn })
    }
}

impl ThemeRepository for SqliteThemeRepository<'_> {
    fn create_theme(&self, title: &str) -> RepoResult<Theme> {
        validate_title("theme title", title)?;

        match insert_row(self.conn, "INSERT INTO themes (title) VALUES (?1);", [title]) {
            WriteOutcome::Written(id) => {
                info!("event=theme_create module=repo status=ok theme_id={id}");
                Ok(Theme::new(id, title))
            }
            WriteOutcome::Conflict => {
                warn!("event=theme_create module=repo status=error error_code=conflict");
                Err(RepoError::Conflict {
                    entity: EntityKind::Theme,
                    key: title.to_string(),
                })
            }
            WriteOutcome::ForeignKeyViolation => Err(RepoError::InvalidData(
                "unexpected foreign key violation writing themes".to_string(),
            )),
            WriteOutcome::Failed(err) => Err(err.into()),
        }
    }

    fn get_theme_by_title(&self, title: &str) -> RepoResult<Option<Theme>> {
        let theme = self
            .conn
            .query_row(
                "SELECT id, title FROM themes WHERE title = ?1;",
                [title],
                parse_theme_row,
            )
            .optional()?;
        Ok(theme)
    }

    fn get_theme_by_id(&self, id: ThemeId) -> RepoResult<Option<Theme>> {
        let theme = self
            .conn
            .query_row(
                "SELECT id, title FROM themes WHERE id = ?1;",
                [id],
                parse_theme_row,
            )
            .optional()?;
        Ok(theme)
    }

    fn list_themes(&self) -> RepoResult<Vec<Theme>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title FROM themes ORDER BY id ASC;")?;
        let themes = stmt
            .query_map([], parse_theme_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(themes)
    }
}

fn parse_theme_row(row: &Row<'_>) -> rusqlite::Result<Theme> {
    Ok(Theme {
        id: row.get("id")?,
        title: row.get("title")?,
    })
}
