//! quizcli-core — Command engine, play session, and collaborator traits.
//!
//! This crate defines the quiz data model, the error taxonomy, and the
//! engine that runs every interactive command against an injected
//! repository and prompter.

pub mod command;
pub mod engine;
pub mod error;
pub mod mock;
pub mod model;
pub mod play;
pub mod report;
pub mod traits;
pub mod validate;

pub use command::Command;
pub use engine::{CommandEngine, Flow};
pub use error::{FieldError, QuizError};
pub use model::{NewQuiz, Quiz, QuizId};
