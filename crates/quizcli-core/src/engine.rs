//! The command engine.
//!
//! Each command is a straight line of awaited steps ending in a single
//! catch: whatever fails is turned into error lines on the reporter, and the
//! command returns [`Flow`] exactly once so the driver can read the next
//! line.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::command::{Command, HELP_ENTRIES};
use crate::error::{QuizError, Result};
use crate::model::{NewQuiz, Quiz, QuizId};
use crate::play::{PlaySession, PlayStep};
use crate::report::{Event, Reporter, Verdict};
use crate::traits::{InputPrompter, QuizRepository};
use crate::validate::validate_id;

const QUESTION_LABEL: &str = " Enter a question: ";
const ANSWER_LABEL: &str = " Enter the answer: ";

/// What the driver should do once a command has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next command.
    Continue,
    /// Close the input and end the session.
    Quit,
}

/// Executes quiz commands against injected collaborators.
pub struct CommandEngine {
    repository: Arc<dyn QuizRepository>,
    prompter: Arc<dyn InputPrompter>,
    reporter: Arc<dyn Reporter>,
    credits: Vec<String>,
    rng: Mutex<StdRng>,
}

impl CommandEngine {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        prompter: Arc<dyn InputPrompter>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            repository,
            prompter,
            reporter,
            credits: Vec::new(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Names shown by `credits`.
    pub fn with_credits(mut self, credits: Vec<String>) -> Self {
        self.credits = credits;
        self
    }

    /// Make play ordering reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Dispatch a parsed command.
    pub async fn execute(&self, command: Command) -> Flow {
        debug!(?command, "executing command");
        match command {
            Command::Help => self.help(),
            Command::List => self.list().await,
            Command::Show { id } => self.show(id.as_deref()).await,
            Command::Add => self.add().await,
            Command::Delete { id } => self.delete(id.as_deref()).await,
            Command::Edit { id } => self.edit(id.as_deref()).await,
            Command::Test { id } => self.test(id.as_deref()).await,
            Command::Play => self.play().await,
            Command::Credits => self.credits(),
            Command::Quit => self.quit(),
            Command::Empty => Flow::Continue,
            Command::Unknown { word } => {
                self.reporter.emit(Event::UnknownCommand(word));
                Flow::Continue
            }
        }
    }

    pub fn help(&self) -> Flow {
        for &(usage, description) in HELP_ENTRIES {
            self.reporter.emit(Event::Help { usage, description });
        }
        Flow::Continue
    }

    pub async fn list(&self) -> Flow {
        let result = self.try_list().await;
        self.finish(result)
    }

    pub async fn show(&self, raw_id: Option<&str>) -> Flow {
        let result = self.try_show(raw_id).await;
        self.finish(result)
    }

    pub async fn add(&self) -> Flow {
        let result = self.try_add().await;
        self.finish(result)
    }

    pub async fn delete(&self, raw_id: Option<&str>) -> Flow {
        let result = self.try_delete(raw_id).await;
        self.finish(result)
    }

    pub async fn edit(&self, raw_id: Option<&str>) -> Flow {
        let result = self.try_edit(raw_id).await;
        self.finish(result)
    }

    pub async fn test(&self, raw_id: Option<&str>) -> Flow {
        let result = self.try_test(raw_id).await;
        self.finish(result)
    }

    pub async fn play(&self) -> Flow {
        let result = self.try_play().await;
        self.finish(result)
    }

    pub fn credits(&self) -> Flow {
        for name in &self.credits {
            self.reporter.emit(Event::Credit(name.clone()));
        }
        Flow::Continue
    }

    pub fn quit(&self) -> Flow {
        Flow::Quit
    }

    // -- command bodies -----------------------------------------------------

    async fn try_list(&self) -> Result<()> {
        for quiz in self.repository.find_all().await? {
            self.reporter.emit(Event::QuizLine {
                id: quiz.id,
                question: quiz.question,
            });
        }
        Ok(())
    }

    async fn try_show(&self, raw_id: Option<&str>) -> Result<()> {
        let id = validate_id(raw_id)?;
        let quiz = self.load(id).await?;
        self.reporter.emit(Event::QuizDetail(quiz));
        Ok(())
    }

    async fn try_add(&self) -> Result<()> {
        let question = self.prompter.ask(QUESTION_LABEL).await?;
        let answer = self.prompter.ask(ANSWER_LABEL).await?;

        let quiz = self
            .repository
            .create(NewQuiz::new(question, answer))
            .await?;
        debug!(id = quiz.id, "quiz created");
        self.reporter.emit(Event::Added(quiz));
        Ok(())
    }

    async fn try_delete(&self, raw_id: Option<&str>) -> Result<()> {
        let id = validate_id(raw_id)?;
        let removed = self.repository.destroy(id).await?;
        debug!(id, removed, "quiz deleted");
        self.reporter.emit(Event::Deleted { id, removed });
        Ok(())
    }

    async fn try_edit(&self, raw_id: Option<&str>) -> Result<()> {
        let id = validate_id(raw_id)?;
        let mut quiz = self.load(id).await?;

        let question = self
            .prompter
            .ask_with_initial(QUESTION_LABEL, &quiz.question)
            .await?;
        let answer = self
            .prompter
            .ask_with_initial(ANSWER_LABEL, &quiz.answer)
            .await?;

        quiz.question = question;
        quiz.answer = answer;
        let quiz = self.repository.update(quiz).await?;
        debug!(id = quiz.id, "quiz updated");
        self.reporter.emit(Event::Edited(quiz));
        Ok(())
    }

    async fn try_test(&self, raw_id: Option<&str>) -> Result<()> {
        let id = validate_id(raw_id)?;
        let quiz = self.load(id).await?;

        let answer = self.prompter.ask(&question_label(&quiz)).await?;
        self.reporter
            .emit(Event::Verdict(Verdict::from_match(quiz.accepts(&answer))));
        Ok(())
    }

    async fn try_play(&self) -> Result<()> {
        let quizzes = self.repository.find_all().await?;
        let mut session = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            PlaySession::start(quizzes, &mut *rng)?
        };
        debug!(questions = session.remaining() + 1, "play session started");

        loop {
            let answer = self.prompter.ask(&question_label(session.current())).await?;
            match session.answer(&answer) {
                PlayStep::Correct(next) => {
                    self.reporter.emit(Event::RunningScore(next.score()));
                    session = next;
                }
                PlayStep::Exhausted { score } => {
                    self.reporter.emit(Event::RunningScore(score));
                    self.reporter.emit(Event::NoMoreQuestions);
                    self.reporter.emit(Event::FinalScore(score));
                    return Ok(());
                }
                PlayStep::Incorrect { score } => {
                    self.reporter.emit(Event::Verdict(Verdict::Incorrect));
                    self.reporter.emit(Event::FinalScore(score));
                    return Ok(());
                }
            }
        }
    }

    // -- helpers ------------------------------------------------------------

    async fn load(&self, id: QuizId) -> Result<Quiz> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(QuizError::NotFound(id))
    }

    fn finish(&self, result: Result<()>) -> Flow {
        if let Err(err) = result {
            debug!(error = %err, "command failed");
            for line in err.user_lines() {
                self.reporter.emit(Event::Error(line));
            }
        }
        Flow::Continue
    }
}

fn question_label(quiz: &Quiz) -> String {
    format!("{}: ", quiz.question)
}
