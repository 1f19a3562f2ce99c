//! quizcli-store — Quiz repositories and configuration.
//!
//! Implements the `QuizRepository` trait for an in-memory table and a JSON
//! document on disk, and loads the `quiz.toml` configuration that picks
//! between them.

pub mod config;
pub mod json;
pub mod memory;
pub mod table;

pub use config::{load_config, load_config_from, open_repository, QuizConfig, StoreConfig};
pub use json::JsonFileRepository;
pub use memory::MemoryRepository;
pub use table::{default_quizzes, QuizTable};
