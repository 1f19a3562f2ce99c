//! Command-line parsing for the interactive session.

/// A parsed command. Id-taking commands keep the raw argument; it is
/// validated when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    Show { id: Option<String> },
    Add,
    Delete { id: Option<String> },
    Edit { id: Option<String> },
    Test { id: Option<String> },
    Play,
    Credits,
    Quit,
    /// Blank line; nothing to do.
    Empty,
    /// Unrecognised command word.
    Unknown { word: String },
}

/// Usage and description for every command, in help order.
pub const HELP_ENTRIES: &[(&str, &str)] = &[
    ("h|help", "Show this help."),
    ("list", "List the existing quizzes."),
    ("show <id>", "Show the question and answer of the given quiz."),
    ("add", "Add a new quiz interactively."),
    ("delete <id>", "Delete the given quiz."),
    ("edit <id>", "Edit the given quiz."),
    ("test <id>", "Test yourself on the given quiz."),
    ("p|play", "Play: answer every quiz in random order."),
    ("credits", "Credits."),
    ("q|quit", "Quit the program."),
];

impl Command {
    /// Parse one input line. The first word picks the command
    /// (case-insensitively), the second is the raw id, the rest is ignored.
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Command::Empty;
        };
        let arg = words.next().map(str::to_string);

        match word.to_lowercase().as_str() {
            "h" | "help" => Command::Help,
            "list" => Command::List,
            "show" => Command::Show { id: arg },
            "add" => Command::Add,
            "delete" => Command::Delete { id: arg },
            "edit" => Command::Edit { id: arg },
            "test" => Command::Test { id: arg },
            "p" | "play" => Command::Play,
            "credits" => Command::Credits,
            "q" | "quit" => Command::Quit,
            _ => Command::Unknown {
                word: word.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!(Command::parse("h"), Command::Help);
        assert_eq!(Command::parse("HELP"), Command::Help);
        assert_eq!(Command::parse("p"), Command::Play);
        assert_eq!(Command::parse("Play"), Command::Play);
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("credits"), Command::Credits);
        assert_eq!(Command::parse("list"), Command::List);
        assert_eq!(Command::parse("add"), Command::Add);
    }

    #[test]
    fn parse_id_argument() {
        assert_eq!(
            Command::parse("  show   3  "),
            Command::Show {
                id: Some("3".into())
            }
        );
        assert_eq!(Command::parse("edit"), Command::Edit { id: None });
        assert_eq!(
            Command::parse("delete abc extra words"),
            Command::Delete {
                id: Some("abc".into())
            }
        );
        assert_eq!(
            Command::parse("test 1"),
            Command::Test {
                id: Some("1".into())
            }
        );
    }

    #[test]
    fn parse_blank_and_unknown() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse("   \t"), Command::Empty);
        assert_eq!(
            Command::parse("frobnicate 1"),
            Command::Unknown {
                word: "frobnicate".into()
            }
        );
    }

    #[test]
    fn help_lists_every_command() {
        for usage in ["list", "show <id>", "add", "delete <id>", "edit <id>", "test <id>"] {
            assert!(HELP_ENTRIES.iter().any(|(u, _)| *u == usage), "{usage}");
        }
    }
}
