//! Question and answer entities.
//!
//! # Responsibility
//! - Carry one quiz prompt together with its candidate answers.
//! - Convert loosely typed request payloads into `Answer` values.
//!
//! # Invariants
//! - Answers exist only as part of a question; they have no identity of
//!   their own outside the owning question.
//! - Shape rules for the answer set live in `crate::validation`, not here.

use crate::model::theme::ThemeId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Storage-assigned question identifier.
pub type QuestionId = i64;

/// One candidate response to a question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer {
    pub title: String,
    pub is_correct: bool,
}

/// Error raised when an untyped payload cannot be read as an `Answer`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerShapeError {
    #[error("answer payload must be an object")]
    NotAnObject,
    #[error("answer payload is missing `{0}`")]
    MissingField(&'static str),
    #[error("answer field `{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl Answer {
    pub fn new(title: impl Into<String>, is_correct: bool) -> Self {
        Self {
            title: title.into(),
            is_correct,
        }
    }

    /// Shorthand for a correct answer.
    pub fn correct(title: impl Into<String>) -> Self {
        Self::new(title, true)
    }

    /// Shorthand for an incorrect answer.
    pub fn incorrect(title: impl Into<String>) -> Self {
        Self::new(title, false)
    }

    /// Builds an answer from a decoded request object.
    ///
    /// Only `title` and `is_correct` are read; other keys are ignored.
    ///
    /// # Errors
    /// - `MissingField` when either key is absent.
    /// - `WrongType` when `title` is not a string or `is_correct` not a bool.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, AnswerShapeError> {
        let title = match map.get("title") {
            None => return Err(AnswerShapeError::MissingField("title")),
            Some(Value::String(title)) => title.clone(),
            Some(_) => {
                return Err(AnswerShapeError::WrongType {
                    field: "title",
                    expected: "string",
                })
            }
        };

        let is_correct = match map.get("is_correct") {
            None => return Err(AnswerShapeError::MissingField("is_correct")),
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                return Err(AnswerShapeError::WrongType {
                    field: "is_correct",
                    expected: "boolean",
                })
            }
        };

        Ok(Self { title, is_correct })
    }
}

impl TryFrom<&Value> for Answer {
    type Error = AnswerShapeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Err(AnswerShapeError::NotAnObject),
        }
    }
}

/// A quiz prompt belonging to exactly one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub theme_id: ThemeId,
    /// Ordered as supplied at creation time.
    pub answers: Vec<Answer>,
}

impl Question {
    /// Returns the answer flagged correct, if the set has exactly one.
    pub fn correct_answer(&self) -> Option<&Answer> {
        let mut correct = self.answers.iter().filter(|answer| answer.is_correct);
        match (correct.next(), correct.next()) {
            (Some(answer), None) => Some(answer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Answer, AnswerShapeError, Question};
    use serde_json::json;

    #[test]
    fn from_map_reads_title_and_flag() {
        let payload = json!({"title": "Paris", "is_correct": true, "extra": 1});
        let answer = Answer::try_from(&payload).unwrap();
        assert_eq!(answer, Answer::correct("Paris"));
    }

    #[test]
    fn from_map_rejects_missing_fields() {
        let missing_flag = json!({"title": "Paris"});
        assert_eq!(
            Answer::try_from(&missing_flag).unwrap_err(),
            AnswerShapeError::MissingField("is_correct")
        );

        let missing_title = json!({"is_correct": false});
        assert_eq!(
            Answer::try_from(&missing_title).unwrap_err(),
            AnswerShapeError::MissingField("title")
        );
    }

    #[test]
    fn from_map_rejects_wrong_types_and_non_objects() {
        let wrong_flag = json!({"title": "Paris", "is_correct": "yes"});
        assert!(matches!(
            Answer::try_from(&wrong_flag).unwrap_err(),
            AnswerShapeError::WrongType {
                field: "is_correct",
                ..
            }
        ));

        let not_object = json!(["Paris", true]);
        assert_eq!(
            Answer::try_from(&not_object).unwrap_err(),
            AnswerShapeError::NotAnObject
        );
    }

    #[test]
    fn correct_answer_requires_a_single_flag() {
        let mut question = Question {
            id: 1,
            title: "Capital of France?".to_string(),
            theme_id: 1,
            answers: vec![Answer::correct("Paris"), Answer::incorrect("Lyon")],
        };
        assert_eq!(question.correct_answer(), Some(&Answer::correct("Paris")));

        question.answers.push(Answer::correct("Marseille"));
        assert_eq!(question.correct_answer(), None);
    }
}
