//! Runtime configuration loaded from the environment.
//!
//! A `.env` file in the working directory is honoured. Variables:
//! `QUIZ_DB_PATH`, `QUIZ_ADMIN_EMAIL`, `QUIZ_ADMIN_PASSWORD`,
//! `QUIZ_LOG_LEVEL`, `QUIZ_LOG_DIR`.

use crate::logging::default_log_level;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DB_PATH_VAR: &str = "QUIZ_DB_PATH";
pub const ADMIN_EMAIL_VAR: &str = "QUIZ_ADMIN_EMAIL";
pub const ADMIN_PASSWORD_VAR: &str = "QUIZ_ADMIN_PASSWORD";
pub const LOG_LEVEL_VAR: &str = "QUIZ_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "QUIZ_LOG_DIR";

const DEFAULT_DB_PATH: &str = "quiz.db";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{present} is set but {missing} is not")]
    IncompleteAdmin {
        present: &'static str,
        missing: &'static str,
    },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Bootstrap administrator credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub db_path: PathBuf,
    pub admin: Option<AdminCredentials>,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<String>,
}

impl QuizConfig {
    /// Loads configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(DB_PATH_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::Empty { var: DB_PATH_VAR })
            }
            Some(value) => PathBuf::from(value),
            None => PathBuf::from(DEFAULT_DB_PATH),
        };

        let admin = match (lookup(ADMIN_EMAIL_VAR), lookup(ADMIN_PASSWORD_VAR)) {
            (Some(email), Some(password)) => {
                if email.trim().is_empty() {
                    return Err(ConfigError::Empty {
                        var: ADMIN_EMAIL_VAR,
                    });
                }
                Some(AdminCredentials { email, password })
            }
            (Some(_), None) => {
                return Err(ConfigError::IncompleteAdmin {
                    present: ADMIN_EMAIL_VAR,
                    missing: ADMIN_PASSWORD_VAR,
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteAdmin {
                    present: ADMIN_PASSWORD_VAR,
                    missing: ADMIN_EMAIL_VAR,
                })
            }
            (None, None) => None,
        };

        let log_level = lookup(LOG_LEVEL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string());
        let log_dir = lookup(LOG_DIR_VAR).filter(|value| !value.trim().is_empty());

        Ok(Self {
            db_path,
            admin,
            log_level,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AdminCredentials, ConfigError, QuizConfig};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn load(pairs: &[(&str, &str)]) -> Result<QuizConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        QuizConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("quiz.db"));
        assert_eq!(config.admin, None);
        assert_eq!(config.log_dir, None);
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn reads_all_variables() {
        let config = load(&[
            ("QUIZ_DB_PATH", "/var/lib/quiz/quiz.db"),
            ("QUIZ_ADMIN_EMAIL", "admin@example.com"),
            ("QUIZ_ADMIN_PASSWORD", "secret"),
            ("QUIZ_LOG_LEVEL", "warn"),
            ("QUIZ_LOG_DIR", "/var/log/quiz"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/var/lib/quiz/quiz.db"));
        assert_eq!(
            config.admin,
            Some(AdminCredentials {
                email: "admin@example.com".to_string(),
                password: "secret".to_string(),
            })
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/quiz"));
    }

    #[test]
    fn admin_credentials_must_come_in_pairs() {
        let err = load(&[("QUIZ_ADMIN_EMAIL", "admin@example.com")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::IncompleteAdmin {
                present: "QUIZ_ADMIN_EMAIL",
                missing: "QUIZ_ADMIN_PASSWORD",
            }
        );
    }

    #[test]
    fn empty_db_path_is_rejected() {
        let err = load(&[("QUIZ_DB_PATH", " ")]).unwrap_err();
        assert_eq!(err, ConfigError::Empty { var: "QUIZ_DB_PATH" });
    }
}
