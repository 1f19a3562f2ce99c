//! Volatile repository, used for `--memory` sessions and in tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use quizcli_core::error::Result;
use quizcli_core::model::{NewQuiz, Quiz, QuizId};
use quizcli_core::traits::QuizRepository;

use crate::table::QuizTable;

/// A repository that keeps quizzes in memory only.
///
/// Counts calls so tests can assert whether storage was touched.
#[derive(Default)]
pub struct MemoryRepository {
    table: Mutex<QuizTable>,
    call_count: AtomicU32,
}

impl MemoryRepository {
    /// An empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository holding the default quizzes.
    pub fn seeded() -> Self {
        Self::from_table(QuizTable::seeded())
    }

    /// A repository holding the given quizzes, ids assigned from 1.
    pub fn with_quizzes(quizzes: impl IntoIterator<Item = NewQuiz>) -> Result<Self> {
        let mut table = QuizTable::default();
        for quiz in quizzes {
            table.insert(quiz)?;
        }
        Ok(Self::from_table(table))
    }

    fn from_table(table: QuizTable) -> Self {
        Self {
            table: Mutex::new(table),
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of repository calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Number of quizzes stored, without counting as a call.
    pub fn len(&self) -> usize {
        self.table.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> MutexGuard<'_, QuizTable> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl QuizRepository for MemoryRepository {
    async fn find_all(&self) -> Result<Vec<Quiz>> {
        Ok(self.table().all())
    }

    async fn find_by_id(&self, id: QuizId) -> Result<Option<Quiz>> {
        Ok(self.table().get(id))
    }

    async fn create(&self, quiz: NewQuiz) -> Result<Quiz> {
        self.table().insert(quiz)
    }

    async fn update(&self, quiz: Quiz) -> Result<Quiz> {
        self.table().update(quiz)
    }

    async fn destroy(&self, id: QuizId) -> Result<u64> {
        Ok(self.table().remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_find() {
        let repo = MemoryRepository::new();
        let created = repo.create(NewQuiz::new("Q1", "A1")).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(repo.call_count(), 2);
    }

    #[tokio::test]
    async fn seeded_has_defaults() {
        let repo = MemoryRepository::seeded();
        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].answer, "Rome");
    }

    #[tokio::test]
    async fn with_quizzes_rejects_invalid() {
        assert!(MemoryRepository::with_quizzes([NewQuiz::new("Q", "")]).is_err());
        let repo = MemoryRepository::with_quizzes([NewQuiz::new("Q", "A")]).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn destroy_counts() {
        let repo = MemoryRepository::seeded();
        assert_eq!(repo.destroy(1).await.unwrap(), 1);
        assert_eq!(repo.destroy(1).await.unwrap(), 0);
        assert_eq!(repo.len(), 3);
    }
}
