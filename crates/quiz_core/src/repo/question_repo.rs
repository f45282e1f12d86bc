//! Question repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Own the answer-set rule and the question + answers multi-row write.
//! - Rebuild questions with their answers from joined rows on read.
//!
//! # Invariants
//! - The answer-set rule is checked before the transaction is opened, so a
//!   rejected question performs no write at all.
//! - The question row and its answer rows are written in one immediate
//!   transaction; any failure rolls both back.
//! - A missing theme is reported from the foreign-key outcome, not from a
//!   lookup ahead of the insert.

use crate::db::outcome::{insert_row, WriteOutcome};
use crate::model::question::{Answer, Question, QuestionId};
use crate::model::theme::ThemeId;
use crate::repo::{
    bool_to_int, ensure_connection_ready, int_to_bool, EntityKind, RepoError, RepoResult,
    TableShape,
};
use crate::validation::{validate_answer_set, validate_title};
use log::{info, warn};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Transaction, TransactionBehavior};

const QUESTION_TABLES: &[TableShape] = &[
    ("themes", &["id"]),
    ("questions", &["id", "title", "theme_id"]),
    ("answers", &["id", "title", "is_correct", "question_id"]),
];

const QUESTION_WITH_ANSWERS_SQL: &str = "SELECT
    q.id AS question_id,
    q.title AS question_title,
    q.theme_id AS theme_id,
    a.title AS answer_title,
    a.is_correct AS is_correct
FROM questions q
LEFT JOIN answers a ON a.question_id = q.id";

/// Repository interface for question operations.
pub trait QuestionRepository {
    /// Validates the answer set, then writes the question and its answers
    /// atomically.
    fn create_question(
        &self,
        title: &str,
        theme_id: ThemeId,
        answers: &[Answer],
    ) -> RepoResult<Question>;
    fn get_question_by_title(&self, title: &str) -> RepoResult<Option<Question>>;
    fn get_question_by_id(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    /// Lists questions, optionally restricted to one existing theme.
    fn list_questions(&self, theme_id: Option<ThemeId>) -> RepoResult<Vec<Question>>;
}

/// SQLite-backed question repository.
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, QUESTION_TABLES)?;
        Ok(Self { conn })
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn create_question(
        &self,
        title: &str,
        theme_id: ThemeId,
        answers: &[Answer],
    ) -> RepoResult<Question> {
        validate_title("question title", title)?;
        validate_answer_set(answers)?;

        // Dropping `tx` without commit rolls back the question row.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let question_id = match insert_row(
            &tx,
            "INSERT INTO questions (title, theme_id) VALUES (?1, ?2);",
            params![title, theme_id],
        ) {
            WriteOutcome::Written(id) => id,
            WriteOutcome::Conflict => {
                warn!("event=question_create module=repo status=error error_code=conflict theme_id={theme_id}");
                return Err(RepoError::Conflict {
                    entity: EntityKind::Question,
                    key: title.to_string(),
                });
            }
            WriteOutcome::ForeignKeyViolation => {
                warn!("event=question_create module=repo status=error error_code=theme_not_found theme_id={theme_id}");
                return Err(RepoError::NotFound {
                    entity: EntityKind::Theme,
                    id: theme_id,
                });
            }
            WriteOutcome::Failed(err) => return Err(err.into()),
        };

        insert_answers(&tx, question_id, answers)?;
        tx.commit()?;

        info!(
            "event=question_create module=repo status=ok question_id={question_id} theme_id={theme_id} answers={}",
            answers.len()
        );
        Ok(Question {
            id: question_id,
            title: title.to_string(),
            theme_id,
            answers: answers.to_vec(),
        })
    }

    fn get_question_by_title(&self, title: &str) -> RepoResult<Option<Question>> {
        let questions = load_questions(
            self.conn,
            " WHERE q.title = ?",
            vec![Value::Text(title.to_string())],
        )?;
        Ok(questions.into_iter().next())
    }

    fn get_question_by_id(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let questions = load_questions(self.conn, " WHERE q.id = ?", vec![Value::Integer(id)])?;
        Ok(questions.into_iter().next())
    }

    fn list_questions(&self, theme_id: Option<ThemeId>) -> RepoResult<Vec<Question>> {
        let Some(theme_id) = theme_id else {
            return load_questions(self.conn, "", Vec::new());
        };

        if !theme_exists(self.conn, theme_id)? {
            warn!("event=question_list module=repo status=error error_code=theme_not_found theme_id={theme_id}");
            return Err(RepoError::NotFound {
                entity: EntityKind::Theme,
                id: theme_id,
            });
        }

        load_questions(
            self.conn,
            " WHERE q.theme_id = ?",
            vec![Value::Integer(theme_id)],
        )
    }
}

fn insert_answers(
    tx: &Transaction<'_>,
    question_id: QuestionId,
    answers: &[Answer],
) -> RepoResult<()> {
    let mut stmt = tx.prepare_cached(
        "INSERT INTO answers (title, is_correct, question_id) VALUES (?1, ?2, ?3);",
    )?;
    for answer in answers {
        stmt.execute(params![
            answer.title.as_str(),
            bool_to_int(answer.is_correct),
            question_id
        ])?;
    }
    Ok(())
}

/// Runs the joined question/answer select and folds rows into questions.
///
/// Rows are ordered by question then answer id, so each question's rows are
/// adjacent and answers keep their insertion order.
fn load_questions(
    conn: &Connection,
    filter_sql: &str,
    bind_values: Vec<Value>,
) -> RepoResult<Vec<Question>> {
    let sql = format!("{QUESTION_WITH_ANSWERS_SQL}{filter_sql} ORDER BY q.id ASC, a.id ASC;");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;

    let mut questions: Vec<Question> = Vec::new();
    while let Some(row) = rows.next()? {
        let question_id: QuestionId = row.get("question_id")?;
        let is_new = questions
            .last()
            .map_or(true, |question| question.id != question_id);
        if is_new {
            questions.push(Question {
                id: question_id,
                title: row.get("question_title")?,
                theme_id: row.get("theme_id")?,
                answers: Vec::new(),
            });
        }

        let answer_title: Option<String> = row.get("answer_title")?;
        if let (Some(title), Some(question)) = (answer_title, questions.last_mut()) {
            let is_correct = int_to_bool(row.get("is_correct")?, "answers.is_correct")?;
            question.answers.push(Answer { title, is_correct });
        }
    }

    Ok(questions)
}

fn theme_exists(conn: &Connection, theme_id: ThemeId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM themes WHERE id = ?1);",
        [theme_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
