//! Structured output of command execution.
//!
//! The engine never prints. It hands [`Event`]s to a [`Reporter`] which
//! decides how they look.

use crate::model::{Quiz, QuizId};

/// Outcome of answering a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn from_match(matched: bool) -> Self {
        if matched {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}

/// Something a command wants the user to see.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// One entry of the help listing: usage and description.
    Help {
        usage: &'static str,
        description: &'static str,
    },
    /// A credits line.
    Credit(String),
    /// One row of `list`.
    QuizLine { id: QuizId, question: String },
    /// Full quiz shown by `show`.
    QuizDetail(Quiz),
    /// A quiz was created.
    Added(Quiz),
    /// A quiz was overwritten.
    Edited(Quiz),
    /// A delete went through; `removed` may be zero.
    Deleted { id: QuizId, removed: u64 },
    /// Result of `test` or of an incorrect `play` answer.
    Verdict(Verdict),
    /// Correct answer during `play`, with the running score.
    RunningScore(u32),
    /// Every question of the play session has been asked.
    NoMoreQuestions,
    /// The play session ended with this score.
    FinalScore(u32),
    /// An unrecognised command word.
    UnknownCommand(String),
    /// A failure line.
    Error(String),
}

/// Sink for command output.
pub trait Reporter: Send + Sync {
    fn emit(&self, event: Event);
}

/// Discards everything.
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn emit(&self, _: Event) {}
}
