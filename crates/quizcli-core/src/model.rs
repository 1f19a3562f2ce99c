//! Core data model types for quizcli.

use serde::{Deserialize, Serialize};

use crate::error::{FieldError, QuizError, Result};

/// Repository-assigned quiz identifier.
pub type QuizId = i64;

/// A persisted question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Unique id, assigned on creation and never changed.
    pub id: QuizId,
    /// The question text.
    pub question: String,
    /// The expected answer.
    pub answer: String,
}

impl Quiz {
    /// Whether `given` matches the stored answer, ignoring surrounding
    /// whitespace and letter case.
    pub fn accepts(&self, given: &str) -> bool {
        normalize_answer(given) == normalize_answer(&self.answer)
    }

    /// Check the content invariants of this quiz.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.question, &self.answer)
    }
}

/// The content of a quiz that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuiz {
    pub question: String,
    pub answer: String,
}

impl NewQuiz {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Check the content invariants before creation.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.question, &self.answer)
    }

    /// Attach a repository-assigned id.
    pub fn with_id(self, id: QuizId) -> Quiz {
        Quiz {
            id,
            question: self.question,
            answer: self.answer,
        }
    }
}

/// Field-level validation shared by every repository.
///
/// Reports all offending fields at once rather than stopping at the first.
pub fn validate_fields(question: &str, answer: &str) -> Result<()> {
    let mut errors = Vec::new();
    if question.trim().is_empty() {
        errors.push(FieldError::new("question", "question must not be empty"));
    }
    if answer.trim().is_empty() {
        errors.push(FieldError::new("answer", "answer must not be empty"));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(QuizError::ValidationFailure(errors))
    }
}

fn normalize_answer(s: &str) -> String {
    s.trim().to_uppercase()
}
