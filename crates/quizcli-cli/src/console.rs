//! Console rendering of engine events.

use std::io::IsTerminal;

use crossterm::style::{Color, Stylize};

use quizcli_core::report::{Event, Reporter, Verdict};

/// Prints events to stdout, and error lines to stderr.
///
/// Colour is used only when stdout is a terminal.
pub struct ConsoleReporter {
    color: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    fn paint(&self, text: impl Into<String>, color: Color) -> String {
        let text = text.into();
        if self.color {
            text.with(color).to_string()
        } else {
            text
        }
    }

    fn banner(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// The line(s) an event renders to, and whether they go to stderr.
    fn render(&self, event: &Event) -> (Vec<String>, bool) {
        let arrow = self.paint("=>", Color::Magenta);
        let lines = match event {
            Event::Help { usage, description } => vec![format!("  {usage} - {description}")],
            Event::Credit(name) => vec![self.paint(name.as_str(), Color::Green)],
            Event::QuizLine { id, question } => {
                vec![format!(" [{}]:  {question}", self.paint(id.to_string(), Color::Magenta))]
            }
            Event::QuizDetail(quiz) => vec![format!(
                " [{}]:  {} {arrow} {}",
                self.paint(quiz.id.to_string(), Color::Magenta),
                quiz.question,
                quiz.answer
            )],
            Event::Added(quiz) => vec![format!(
                " {}: {} {arrow} {}",
                self.paint("Added", Color::Magenta),
                quiz.question,
                quiz.answer
            )],
            Event::Edited(quiz) => vec![format!(
                " Quiz {} changed to: {} {arrow} {}",
                self.paint(quiz.id.to_string(), Color::Magenta),
                quiz.question,
                quiz.answer
            )],
            Event::Deleted { id, removed: 0 } => vec![format!(" No quiz with id={id}, nothing deleted.")],
            Event::Deleted { id, .. } => vec![format!(
                " {} quiz {}",
                self.paint("Deleted", Color::Magenta),
                self.paint(id.to_string(), Color::Magenta)
            )],
            Event::Verdict(Verdict::Correct) => vec![
                "Your answer is:".to_string(),
                self.banner("CORRECT", Color::Green),
            ],
            Event::Verdict(Verdict::Incorrect) => vec![
                "Your answer is:".to_string(),
                self.banner("INCORRECT", Color::Red),
            ],
            Event::RunningScore(score) => {
                vec![self.paint(format!("CORRECT - {score} right so far."), Color::Green)]
            }
            Event::NoMoreQuestions => vec!["Nothing more to ask.".to_string()],
            Event::FinalScore(score) => vec![
                "End of the game. Score:".to_string(),
                self.banner(&score.to_string(), Color::Blue),
            ],
            Event::UnknownCommand(word) => vec![
                format!("Unknown command: '{}'", self.paint(word.as_str(), Color::Red)),
                format!("Use {} to see all the commands.", self.paint("help", Color::Green)),
            ],
            Event::Error(line) => {
                return (
                    vec![format!("{} {line}", self.paint("Error:", Color::Red))],
                    true,
                )
            }
        };
        (lines, false)
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn emit(&self, event: Event) {
        let (lines, to_stderr) = self.render(&event);
        for line in lines {
            if to_stderr {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
    }
}
