//! Persistent repository backed by a single JSON document.
//!
//! Every mutation is applied to a copy of the table, written to a temporary
//! file, and renamed over the document; the in-memory table only changes
//! once the write has succeeded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

use quizcli_core::error::{self, QuizError};
use quizcli_core::model::{NewQuiz, Quiz, QuizId};
use quizcli_core::traits::QuizRepository;

use crate::table::QuizTable;

/// A repository persisted as pretty-printed JSON at `path`.
pub struct JsonFileRepository {
    path: PathBuf,
    table: Mutex<QuizTable>,
}

impl JsonFileRepository {
    /// Open the document at `path`, creating it if absent.
    ///
    /// A newly created document holds the default quizzes when
    /// `seed_defaults` is set, and nothing otherwise.
    pub async fn open(path: impl Into<PathBuf>, seed_defaults: bool) -> Result<Self> {
        let path = path.into();

        let table = if tokio::fs::try_exists(&path)
            .await
            .with_context(|| format!("failed to access quiz store: {}", path.display()))?
        {
            let content = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read quiz store: {}", path.display()))?;
            let mut table: QuizTable = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse quiz store: {}", path.display()))?;
            table
                .normalize()
                .with_context(|| format!("failed to load quiz store: {}", path.display()))?;
            tracing::debug!(path = %path.display(), quizzes = table.len(), "quiz store loaded");
            table
        } else {
            let table = if seed_defaults {
                QuizTable::seeded()
            } else {
                QuizTable::default()
            };
            write_table(&path, &table)
                .await
                .with_context(|| format!("failed to create quiz store: {}", path.display()))?;
            tracing::info!(path = %path.display(), quizzes = table.len(), "quiz store created");
            table
        };

        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the table and persist it.
    async fn mutate<T>(
        &self,
        change: impl FnOnce(&mut QuizTable) -> error::Result<T>,
    ) -> error::Result<T> {
        let mut table = self.table.lock().await;
        let mut next = table.clone();
        let value = change(&mut next)?;
        write_table(&self.path, &next)
            .await
            .map_err(|e| QuizError::storage(format!("{}: {e:#}", self.path.display())))?;
        *table = next;
        Ok(value)
    }
}

async fn write_table(path: &Path, table: &QuizTable) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(table)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl QuizRepository for JsonFileRepository {
    async fn find_all(&self) -> error::Result<Vec<Quiz>> {
        Ok(self.table.lock().await.all())
    }

    async fn find_by_id(&self, id: QuizId) -> error::Result<Option<Quiz>> {
        Ok(self.table.lock().await.get(id))
    }

    async fn create(&self, quiz: NewQuiz) -> error::Result<Quiz> {
        self.mutate(|table| table.insert(quiz)).await
    }

    async fn update(&self, quiz: Quiz) -> error::Result<Quiz> {
        self.mutate(|table| table.update(quiz)).await
    }

    async fn destroy(&self, id: QuizId) -> error::Result<u64> {
        self.mutate(|table| Ok(table.remove(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_store_is_seeded_and_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quizzes.json");

        let repo = JsonFileRepository::open(&path, true).await.unwrap();
        assert!(path.exists());
        assert_eq!(repo.find_all().await.unwrap().len(), 4);
        assert_eq!(repo.path(), path.as_path());
    }

    #[tokio::test]
    async fn unseeded_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path().join("q.json"), false)
            .await
            .unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn changes_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.json");

        let repo = JsonFileRepository::open(&path, false).await.unwrap();
        let created = repo.create(NewQuiz::new("Q1", "A1")).await.unwrap();
        let mut edited = created.clone();
        edited.answer = "A2".into();
        repo.update(edited).await.unwrap();
        let other = repo.create(NewQuiz::new("Q3", "A3")).await.unwrap();
        assert_eq!(repo.destroy(other.id).await.unwrap(), 1);
        drop(repo);

        let reopened = JsonFileRepository::open(&path, true).await.unwrap();
        let all = reopened.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, created.id);
        assert_eq!(all[0].answer, "A2");

        // Ids keep counting past deleted records.
        let next = reopened.create(NewQuiz::new("Q4", "A4")).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn validation_failure_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.json");
        let repo = JsonFileRepository::open(&path, false).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = repo.create(NewQuiz::new("", "")).await.unwrap_err();
        assert!(matches!(err, QuizError::ValidationFailure(ref e) if e.len() == 2));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn corrupt_store_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileRepository::open(&path, true).await.err().unwrap();
        assert!(format!("{err:#}").contains("failed to parse quiz store"));
    }

    #[tokio::test]
    async fn store_at_id_limit_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.json");
        std::fs::write(
            &path,
            format!(
                r#"{{"next_id": 1, "quizzes": [{{"id": {}, "question": "Q", "answer": "A"}}]}}"#,
                i64::MAX
            ),
        )
        .unwrap();

        let err = JsonFileRepository::open(&path, true).await.err().unwrap();
        assert!(format!("{err:#}").contains("quiz id space exhausted"));
    }
}
