//! Answer-set and title rules checked before any write.
//!
//! # Responsibility
//! - Provide pure predicates that need no storage to evaluate.
//! - Turn a failed predicate into a precise `ValidationError`.
//!
//! # Invariants
//! - Every rule is evaluated before the first SQL mutation of an operation.
//! - A question's answers number at least [`MIN_ANSWERS`] and contain
//!   exactly one correct answer.

use crate::model::question::Answer;
use thiserror::Error;

/// Smallest answer set a question may be created with.
pub const MIN_ANSWERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a question needs at least {min} answers, got {actual}")]
    TooFewAnswers { min: usize, actual: usize },
    #[error("a question needs exactly one correct answer, got {actual}")]
    CorrectAnswerCount { actual: usize },
    #[error("{field} must not be empty")]
    EmptyTitle { field: &'static str },
}

pub fn has_minimum_answers(answers: &[Answer], min: usize) -> bool {
    answers.len() >= min
}

pub fn has_exactly_one_correct_answer(answers: &[Answer]) -> bool {
    correct_answer_count(answers) == 1
}

pub fn correct_answer_count(answers: &[Answer]) -> usize {
    answers.iter().filter(|answer| answer.is_correct).count()
}

/// Checks the full answer-set rule, including non-blank answer titles.
pub fn validate_answer_set(answers: &[Answer]) -> Result<(), ValidationError> {
    if !has_minimum_answers(answers, MIN_ANSWERS) {
        return Err(ValidationError::TooFewAnswers {
            min: MIN_ANSWERS,
            actual: answers.len(),
        });
    }

    if !has_exactly_one_correct_answer(answers) {
        return Err(ValidationError::CorrectAnswerCount {
            actual: correct_answer_count(answers),
        });
    }

    for answer in answers {
        validate_title("answer title", &answer.title)?;
    }

    Ok(())
}

/// Rejects titles that are empty or whitespace only.
pub fn validate_title(field: &'static str, title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle { field });
    }
    Ok(())
}
