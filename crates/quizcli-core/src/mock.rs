//! Test doubles for driving the command engine without a terminal.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{QuizError, Result};
use crate::report::{Event, Reporter};
use crate::traits::InputPrompter;

/// A prompt the engine issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskedPrompt {
    pub label: String,
    /// Editable content offered with the prompt, if any.
    pub initial: Option<String>,
}

/// Answers prompts from a fixed script, in order.
///
/// Once the script runs out every prompt fails with [`QuizError::Input`],
/// the same way a closed terminal would.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<AskedPrompt>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt issued so far.
    pub fn asked(&self) -> Vec<AskedPrompt> {
        self.asked.lock().unwrap().clone()
    }

    /// Number of prompts issued so far.
    pub fn ask_count(&self) -> usize {
        self.asked.lock().unwrap().len()
    }

    /// Scripted answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, label: &str, initial: Option<&str>) -> Result<String> {
        self.asked.lock().unwrap().push(AskedPrompt {
            label: label.to_string(),
            initial: initial.map(str::to_string),
        });
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .map(|a| a.trim().to_string())
            .ok_or_else(|| QuizError::Input("no more scripted answers".into()))
    }
}

#[async_trait]
impl InputPrompter for ScriptedPrompter {
    async fn ask(&self, label: &str) -> Result<String> {
        self.next(label, None)
    }

    async fn ask_with_initial(&self, label: &str, initial: &str) -> Result<String> {
        self.next(label, Some(initial))
    }
}

/// Collects every event for later inspection.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Only the error lines.
    pub fn errors(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                Event::Error(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Reporter for RecordingReporter {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}
