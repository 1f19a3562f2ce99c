//! The `play` session state machine.
//!
//! A session is a snapshot of every quiz, shuffled once, asked one at a time
//! until the queue runs dry or an answer is wrong. The state is a plain value
//! threaded through [`PlaySession::answer`], so the machine can be driven
//! without any I/O.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{QuizError, Result};
use crate::model::Quiz;

/// The questioning state: the quiz being asked, those still queued, and the
/// score so far.
#[derive(Debug, Clone)]
pub struct PlaySession {
    current: Quiz,
    queue: Vec<Quiz>,
    score: u32,
}

/// Where the machine goes after an answer.
#[derive(Debug, Clone)]
pub enum PlayStep {
    /// Correct, and there are more questions.
    Correct(PlaySession),
    /// Correct, and that was the last question.
    Exhausted { score: u32 },
    /// Wrong answer. Remaining questions are dropped.
    Incorrect { score: u32 },
}

impl PlayStep {
    /// Final score if this step ends the session.
    pub fn final_score(&self) -> Option<u32> {
        match self {
            PlayStep::Correct(_) => None,
            PlayStep::Exhausted { score } | PlayStep::Incorrect { score } => Some(*score),
        }
    }
}

impl PlaySession {
    /// Start a session over `quizzes` in a uniformly random order.
    pub fn start<R: Rng + ?Sized>(mut quizzes: Vec<Quiz>, rng: &mut R) -> Result<Self> {
        quizzes.shuffle(rng);
        Self::from_queue(quizzes)
    }

    /// Start a session that asks `queue` from the back, without shuffling.
    pub fn from_queue(mut queue: Vec<Quiz>) -> Result<Self> {
        let current = queue.pop().ok_or(QuizError::EmptyCollection)?;
        Ok(Self {
            current,
            queue,
            score: 0,
        })
    }

    /// The quiz awaiting an answer.
    pub fn current(&self) -> &Quiz {
        &self.current
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Questions left after the current one.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Judge `given` against the current quiz and advance.
    pub fn answer(mut self, given: &str) -> PlayStep {
        if !self.current.accepts(given) {
            return PlayStep::Incorrect { score: self.score };
        }

        self.score += 1;
        match self.queue.pop() {
            Some(next) => {
                self.current = next;
                PlayStep::Correct(self)
            }
            None => PlayStep::Exhausted { score: self.score },
        }
    }
}
