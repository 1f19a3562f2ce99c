//! In-memory quiz table shared by every repository.

use serde::{Deserialize, Serialize};

use quizcli_core::error::{QuizError, Result};
use quizcli_core::model::{NewQuiz, Quiz, QuizId};

/// Quizzes in insertion order plus the id counter.
///
/// This is also the on-disk document of the JSON store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizTable {
    next_id: QuizId,
    #[serde(default)]
    quizzes: Vec<Quiz>,
}

impl Default for QuizTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            quizzes: Vec::new(),
        }
    }
}

impl QuizTable {
    /// A table pre-populated with [`default_quizzes`].
    pub fn seeded() -> Self {
        let quizzes: Vec<Quiz> = default_quizzes()
            .into_iter()
            .zip(1..)
            .map(|(quiz, id)| quiz.with_id(id))
            .collect();
        Self {
            next_id: quizzes.len() as QuizId + 1,
            quizzes,
        }
    }

    pub fn all(&self) -> Vec<Quiz> {
        self.quizzes.clone()
    }

    pub fn get(&self, id: QuizId) -> Option<Quiz> {
        self.quizzes.iter().find(|q| q.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// Validate and append, assigning the next id.
    pub fn insert(&mut self, quiz: NewQuiz) -> Result<Quiz> {
        quiz.validate()?;
        let next_id = self.next_id.checked_add(1).ok_or_else(id_space_exhausted)?;
        let quiz = quiz.with_id(self.next_id);
        self.next_id = next_id;
        self.quizzes.push(quiz.clone());
        Ok(quiz)
    }

    /// Validate and overwrite the quiz with the same id.
    pub fn update(&mut self, quiz: Quiz) -> Result<Quiz> {
        quiz.validate()?;
        let slot = self
            .quizzes
            .iter_mut()
            .find(|q| q.id == quiz.id)
            .ok_or(QuizError::NotFound(quiz.id))?;
        slot.question = quiz.question.clone();
        slot.answer = quiz.answer.clone();
        Ok(quiz)
    }

    /// Remove by id, returning how many records went away.
    pub fn remove(&mut self, id: QuizId) -> u64 {
        let before = self.quizzes.len();
        self.quizzes.retain(|q| q.id != id);
        (before - self.quizzes.len()) as u64
    }

    /// Repair the id counter after loading a hand-edited document.
    ///
    /// Fails when the document already holds the largest representable id.
    pub(crate) fn normalize(&mut self) -> Result<()> {
        let max_id = self.quizzes.iter().map(|q| q.id).max().unwrap_or(0);
        if self.next_id <= max_id {
            self.next_id = max_id.checked_add(1).ok_or_else(id_space_exhausted)?;
        }
        Ok(())
    }
}

fn id_space_exhausted() -> QuizError {
    QuizError::storage("quiz id space exhausted")
}

/// The quizzes a fresh store starts with.
pub fn default_quizzes() -> Vec<NewQuiz> {
    vec![
        NewQuiz::new("Capital of Italy", "Rome"),
        NewQuiz::new("Capital of France", "Paris"),
        NewQuiz::new("Capital of Spain", "Madrid"),
        NewQuiz::new("Capital of Portugal", "Lisbon"),
    ]
}
