//! The interactive session loop.

use std::path::PathBuf;
use std::sync::Arc;

use rustyline::error::ReadlineError;

use quizcli_core::{Command, CommandEngine, Flow};

use crate::prompter::RustylinePrompter;

/// Reads command lines and hands them to the engine, one at a time.
pub struct Session {
    engine: CommandEngine,
    prompter: Arc<RustylinePrompter>,
    prompt: String,
    history_path: Option<PathBuf>,
}

impl Session {
    pub fn new(
        engine: CommandEngine,
        prompter: Arc<RustylinePrompter>,
        prompt: String,
        history_path: Option<PathBuf>,
    ) -> Self {
        Self {
            engine,
            prompter,
            prompt,
            history_path,
        }
    }

    /// Run until `quit` or end of input.
    pub async fn run(&self) {
        if let Some(path) = &self.history_path {
            self.prompter.load_history(path);
        }

        loop {
            match self.prompter.read_line(&self.prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        self.prompter.add_history(line);
                    }
                    if self.engine.execute(Command::parse(line)).await == Flow::Quit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Use 'quit' or Ctrl-D to exit.");
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!(error = %e, "failed to read command");
                    break;
                }
            }
        }

        if let Some(path) = &self.history_path {
            self.prompter.save_history(path);
        }
        tracing::debug!("session ended");
    }
}
