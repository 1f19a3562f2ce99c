//! Line-editor prompts backed by rustyline.

use std::io::IsTerminal;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use quizcli_core::error::{self, QuizError};
use quizcli_core::traits::InputPrompter;

/// Terminal prompter shared by the session loop and the command engine.
///
/// Reads block the calling worker thread, which is fine: only one command
/// is ever waiting for input.
pub struct RustylinePrompter {
    editor: Mutex<DefaultEditor>,
    prefill: bool,
}

impl RustylinePrompter {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("failed to create line editor")?;
        Ok(Self {
            editor: Mutex::new(editor),
            prefill: std::io::stdout().is_terminal(),
        })
    }

    /// Read one raw line, keeping rustyline's error so the session loop can
    /// tell Ctrl-C from end of input.
    pub fn read_line(&self, prompt: &str) -> rustyline::Result<String> {
        tokio::task::block_in_place(|| self.editor().readline(prompt))
    }

    pub fn add_history(&self, line: &str) {
        let _ = self.editor().add_history_entry(line);
    }

    pub fn load_history(&self, path: &Path) {
        if let Err(e) = self.editor().load_history(path) {
            tracing::debug!(path = %path.display(), error = %e, "no history loaded");
        }
    }

    pub fn save_history(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = self.editor().save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }

    fn editor(&self) -> MutexGuard<'_, DefaultEditor> {
        self.editor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn to_quiz_error(err: ReadlineError) -> QuizError {
    match err {
        ReadlineError::Eof => QuizError::Input("end of input".into()),
        ReadlineError::Interrupted => QuizError::Input("interrupted".into()),
        other => QuizError::Input(other.to_string()),
    }
}

#[async_trait]
impl InputPrompter for RustylinePrompter {
    async fn ask(&self, label: &str) -> error::Result<String> {
        self.read_line(label)
            .map(|line| line.trim().to_string())
            .map_err(to_quiz_error)
    }

    async fn ask_with_initial(&self, label: &str, initial: &str) -> error::Result<String> {
        if !self.prefill {
            return self.ask(label).await;
        }
        tokio::task::block_in_place(|| self.editor().readline_with_initial(label, (initial, "")))
            .map(|line| line.trim().to_string())
            .map_err(to_quiz_error)
    }
}
