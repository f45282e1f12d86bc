//! Administrator account repository.
//!
//! # Invariants
//! - Emails are unique; duplicates surface as `RepoError::Conflict`.
//! - Only password hashes are stored or logged.

use crate::db::outcome::{insert_row, WriteOutcome};
use crate::model::admin::Admin;
use crate::repo::{ensure_connection_ready, EntityKind, RepoError, RepoResult, TableShape};
use crate::validation::validate_title;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};

const ADMIN_TABLES: &[TableShape] = &[("admins", &["id", "email", "password"])];

pub trait AdminRepository {
    fn create_admin(&self, email: &str, password: &str) -> RepoResult<Admin>;
    fn get_admin_by_email(&self, email: &str) -> RepoResult<Option<Admin>>;
    /// Returns the admin with `email`, creating it when absent.
    ///
    /// Used for startup bootstrap, so repeated calls are harmless. An
    /// existing admin keeps its stored password.
    fn ensure_admin(&self, email: &str, password: &str) -> RepoResult<Admin>;
}

/// SQLite-backed admin repository.
pub struct SqliteAdminRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAdminRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, ADMIN_TABLES)?;
        Ok(Self { conn })
    }
}

impl AdminRepository for SqliteAdminRepository<'_> {
    fn create_admin(&self, email: &str, password: &str) -> RepoResult<Admin> {
        validate_title("admin email", email)?;
        let password_hash = Admin::hash_password(password);

        match insert_row(
            self.conn,
            "INSERT INTO admins (email, password) VALUES (?1, ?2);",
            params![email, password_hash.as_str()],
        ) {
            WriteOutcome::Written(id) => {
                info!("event=admin_create module=repo status=ok admin_id={id}");
                Ok(Admin {
                    id,
                    email: email.to_string(),
                    password_hash: Some(password_hash),
                })
            }
            WriteOutcome::Conflict => {
                warn!("event=admin_create module=repo status=error error_code=conflict");
                Err(RepoError::Conflict {
                    entity: EntityKind::Admin,
                    key: email.to_string(),
                })
            }
            WriteOutcome::ForeignKeyViolation => Err(RepoError::InvalidData(
                "unexpected foreign key violation writing admins".to_string(),
            )),
            WriteOutcome::Failed(err) => Err(err.into()),
        }
    }

    fn get_admin_by_email(&self, email: &str) -> RepoResult<Option<Admin>> {
        let admin = self
            .conn
            .query_row(
                "SELECT id, email, password FROM admins WHERE email = ?1;",
                [email],
                |row| {
                    Ok(Admin {
                        id: row.get("id")?,
                        email: row.get("email")?,
                        password_hash: row.get("password")?,
                    })
                },
            )
            .optional()?;
        Ok(admin)
    }

    fn ensure_admin(&self, email: &str, password: &str) -> RepoResult<Admin> {
        if let Some(existing) = self.get_admin_by_email(email)? {
            return Ok(existing);
        }

        match self.create_admin(email, password) {
            Ok(admin) => Ok(admin),
            // Another process created it between the lookup and the insert.
            Err(RepoError::Conflict { .. }) => self.get_admin_by_email(email)?.ok_or_else(|| {
                RepoError::InvalidData(format!("admin `{email}` vanished after conflict"))
            }),
            Err(err) => Err(err),
        }
    }
}
