//! Administrative command line for the quiz content store.
//!
//! # Responsibility
//! - Map arguments to repository calls and print results as JSON.
//! - Map repository error kinds to process exit codes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use quiz_core::db::open_db;
use quiz_core::{
    init_logging, AdminRepository, Answer, AnswerShapeError, ErrorKind, QuestionRepository,
    QuizConfig, RepoError, SqliteAdminRepository, SqliteQuestionRepository,
    SqliteThemeRepository, ThemeId, ThemeRepository,
};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "quiz", version, about = "Manage quiz themes and questions")]
struct Cli {
    /// Database file; overrides QUIZ_DB_PATH.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or migrate the database and ensure the configured admin.
    Init,
    #[command(subcommand)]
    Theme(ThemeCommand),
    #[command(subcommand)]
    Question(QuestionCommand),
}

#[derive(Debug, Subcommand)]
enum ThemeCommand {
    Add { title: String },
    List,
}

#[derive(Debug, Subcommand)]
enum QuestionCommand {
    Add {
        #[arg(long)]
        theme_id: ThemeId,
        #[arg(long)]
        title: String,
        /// JSON array of {"title": ..., "is_correct": ...} objects.
        #[arg(long)]
        answers: String,
    },
    Get {
        title: String,
    },
    List {
        #[arg(long)]
        theme_id: Option<ThemeId>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = QuizConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    let db_path = cli.db.unwrap_or(config.db_path);
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;

    match cli.command {
        Command::Init => {
            if let Some(admin) = config.admin.as_ref() {
                let repo = SqliteAdminRepository::try_new(&conn)?;
                let admin = repo.ensure_admin(&admin.email, &admin.password)?;
                info!("event=admin_bootstrap module=cli status=ok admin_id={}", admin.id);
                print_json(&admin)?;
            }
            info!("event=init module=cli status=ok");
        }
        Command::Theme(ThemeCommand::Add { title }) => {
            let repo = SqliteThemeRepository::try_new(&conn)?;
            print_json(&repo.create_theme(&title)?)?;
        }
        Command::Theme(ThemeCommand::List) => {
            let repo = SqliteThemeRepository::try_new(&conn)?;
            print_json(&repo.list_themes()?)?;
        }
        Command::Question(QuestionCommand::Add {
            theme_id,
            title,
            answers,
        }) => {
            let answers = parse_answers(&answers)?;
            let repo = SqliteQuestionRepository::try_new(&conn)?;
            print_json(&repo.create_question(&title, theme_id, &answers)?)?;
        }
        Command::Question(QuestionCommand::Get { title }) => {
            let repo = SqliteQuestionRepository::try_new(&conn)?;
            print_json(&repo.get_question_by_title(&title)?)?;
        }
        Command::Question(QuestionCommand::List { theme_id }) => {
            let repo = SqliteQuestionRepository::try_new(&conn)?;
            print_json(&repo.list_questions(theme_id)?)?;
        }
    }

    Ok(())
}

fn parse_answers(raw: &str) -> Result<Vec<Answer>> {
    let items: Vec<Value> =
        serde_json::from_str(raw).context("--answers must be a JSON array")?;
    let answers = items
        .iter()
        .map(Answer::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(answers)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<AnswerShapeError>().is_some()
        || err.downcast_ref::<serde_json::Error>().is_some()
    {
        return 2;
    }
    match err.downcast_ref::<RepoError>().map(RepoError::kind) {
        Some(ErrorKind::Validation) => 2,
        Some(ErrorKind::Conflict) => 3,
        Some(ErrorKind::NotFound) => 4,
        Some(ErrorKind::Storage) | None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::{exit_code, parse_answers};
    use quiz_core::{Answer, EntityKind, RepoError};

    #[test]
    fn parse_answers_reads_json_array() {
        let raw = r#"[{"title": "A", "is_correct": true}, {"title": "B", "is_correct": false}]"#;
        let answers = parse_answers(raw).unwrap();
        assert_eq!(answers, vec![Answer::correct("A"), Answer::incorrect("B")]);
    }

    #[test]
    fn malformed_answers_exit_with_input_code() {
        let missing_flag = parse_answers(r#"[{"title": "A"}]"#).unwrap_err();
        assert_eq!(exit_code(&missing_flag), 2);

        let not_array = parse_answers(r#"{"title": "A", "is_correct": true}"#).unwrap_err();
        assert_eq!(exit_code(&not_array), 2);

        let not_json = parse_answers("nope").unwrap_err();
        assert_eq!(exit_code(&not_json), 2);
    }

    #[test]
    fn repository_errors_map_to_distinct_codes() {
        let conflict = anyhow::Error::from(RepoError::Conflict {
            entity: EntityKind::Theme,
            key: "Sports".to_string(),
        });
        assert_eq!(exit_code(&conflict), 3);

        let not_found = anyhow::Error::from(RepoError::NotFound {
            entity: EntityKind::Theme,
            id: 9,
        });
        assert_eq!(exit_code(&not_found), 4);
    }
}
