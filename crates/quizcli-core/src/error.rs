//! Error taxonomy for quiz commands.
//!
//! Every command catches these at its boundary and turns them into the
//! lines the user sees. None of them ends the session.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::QuizId;

/// A field-level rejection produced when a quiz fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field (e.g. "question").
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Errors that can occur while executing a quiz command.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The `<id>` argument was not supplied.
    #[error("missing parameter <id>")]
    MissingParameter,

    /// The `<id>` argument is not a number.
    #[error("the value of parameter <id> is not a number: '{0}'")]
    InvalidParameter(String),

    /// The id is well formed but no quiz has it.
    #[error("there is no quiz associated with id={0}")]
    NotFound(QuizId),

    /// The repository rejected the quiz content.
    #[error("invalid quiz: {}", join_messages(.0))]
    ValidationFailure(Vec<FieldError>),

    /// The underlying store failed.
    #[error("storage error: {0}")]
    StorageFailure(String),

    /// `play` was invoked with no quizzes stored.
    #[error("there are no questions")]
    EmptyCollection,

    /// The prompt source failed or was closed while a command waited for input.
    #[error("input closed: {0}")]
    Input(String),
}

/// Shorthand result type for quiz operations.
pub type Result<T> = std::result::Result<T, QuizError>;

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl QuizError {
    /// Wrap any displayable storage failure.
    pub fn storage(err: impl fmt::Display) -> Self {
        QuizError::StorageFailure(err.to_string())
    }

    /// The lines shown to the user for this failure.
    ///
    /// Validation failures produce a generic notice followed by one line per
    /// field message; every other kind is a single line.
    pub fn user_lines(&self) -> Vec<String> {
        match self {
            QuizError::ValidationFailure(errors) => {
                let mut lines = Vec::with_capacity(errors.len() + 1);
                lines.push("The quiz is invalid:".to_string());
                lines.extend(errors.iter().map(|e| e.message.clone()));
                lines
            }
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_id() {
        let err = QuizError::NotFound(42);
        assert!(err.to_string().contains("id=42"));
    }

    #[test]
    fn validation_failure_lines() {
        let err = QuizError::ValidationFailure(vec![
            FieldError::new("question", "question must not be empty"),
            FieldError::new("answer", "answer must not be empty"),
        ]);
        let lines = err.user_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "The quiz is invalid:");
        assert_eq!(lines[1], "question must not be empty");
        assert_eq!(lines[2], "answer must not be empty");
    }

    #[test]
    fn other_errors_are_single_line() {
        assert_eq!(QuizError::EmptyCollection.user_lines().len(), 1);
        assert_eq!(QuizError::MissingParameter.user_lines().len(), 1);
        assert_eq!(QuizError::storage("disk full").user_lines().len(), 1);
    }
}
