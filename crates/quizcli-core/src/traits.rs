//! Collaborator traits the command engine is built on.
//!
//! Repositories live in `quizcli-store`; the terminal prompter lives in the
//! `quiz` binary. Tests substitute the doubles in [`crate::mock`].

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{NewQuiz, Quiz, QuizId};

// ---------------------------------------------------------------------------
// Quiz repository
// ---------------------------------------------------------------------------

/// Persistent storage for quizzes.
///
/// `create` and `update` run field validation and fail with
/// [`QuizError::ValidationFailure`](crate::error::QuizError::ValidationFailure)
/// without touching storage when it does not pass.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// All quizzes, in storage order.
    async fn find_all(&self) -> Result<Vec<Quiz>>;

    /// The quiz with the given id, if any.
    async fn find_by_id(&self, id: QuizId) -> Result<Option<Quiz>>;

    /// Persist a new quiz and return it with its assigned id.
    async fn create(&self, quiz: NewQuiz) -> Result<Quiz>;

    /// Overwrite an existing quiz's content. The id is never changed.
    async fn update(&self, quiz: Quiz) -> Result<Quiz>;

    /// Delete by id, returning the number of records removed.
    async fn destroy(&self, id: QuizId) -> Result<u64>;
}

// ---------------------------------------------------------------------------
// Input prompter
// ---------------------------------------------------------------------------

/// Asks the user for one line of text.
#[async_trait]
pub trait InputPrompter: Send + Sync {
    /// Show `label` and wait for a line. The result is trimmed.
    async fn ask(&self, label: &str) -> Result<String>;

    /// Like [`ask`](Self::ask), with `initial` offered as editable content.
    ///
    /// Prompt surfaces that cannot prefill fall back to a plain `ask`.
    async fn ask_with_initial(&self, label: &str, _initial: &str) -> Result<String> {
        self.ask(label).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PlainPrompter;

    #[async_trait]
    impl InputPrompter for PlainPrompter {
        async fn ask(&self, label: &str) -> Result<String> {
            Ok(format!("{label}!"))
        }
    }

    #[tokio::test]
    async fn initial_content_falls_back_to_ask() {
        let answer = PlainPrompter.ask_with_initial("Question", "old").await.unwrap();
        assert_eq!(answer, "Question!");
    }
}
