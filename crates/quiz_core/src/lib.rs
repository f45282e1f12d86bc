//! Quiz content store: themes, questions and their answers.
//!
//! This crate is the single source of truth for content invariants
//! (answer-set shape, referential integrity, title uniqueness).

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod validation;

pub use config::{AdminCredentials, ConfigError, QuizConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::admin::{Admin, AdminId};
pub use model::question::{Answer, AnswerShapeError, Question, QuestionId};
pub use model::theme::{Theme, ThemeId};
pub use repo::admin_repo::{AdminRepository, SqliteAdminRepository};
pub use repo::question_repo::{QuestionRepository, SqliteQuestionRepository};
pub use repo::theme_repo::{SqliteThemeRepository, ThemeRepository};
pub use repo::{EntityKind, ErrorKind, RepoError, RepoResult};
pub use validation::{
    has_exactly_one_correct_answer, has_minimum_answers, ValidationError, MIN_ANSWERS,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
