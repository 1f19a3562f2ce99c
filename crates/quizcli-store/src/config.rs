//! Configuration loading and repository factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizcli_core::traits::QuizRepository;

use crate::json::JsonFileRepository;
use crate::memory::MemoryRepository;

/// Where quizzes are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// A JSON document on disk.
    Json {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
    /// Nothing is persisted.
    Memory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Json {
            path: default_store_path(),
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("quizzes.json")
}

/// Top-level quizcli configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Quiz storage.
    #[serde(default)]
    pub store: StoreConfig,
    /// Populate a newly created store with the default quizzes.
    #[serde(default = "default_true")]
    pub seed_defaults: bool,
    /// Line-editor history file. No history is kept when unset.
    #[serde(default)]
    pub history_file: Option<PathBuf>,
    /// Top-level prompt.
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Names shown by `credits`.
    #[serde(default = "default_credits")]
    pub credits: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_prompt() -> String {
    "quiz> ".to_string()
}
fn default_credits() -> Vec<String> {
    vec!["The quizcli authors".to_string()]
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            seed_defaults: default_true(),
            history_file: None,
            prompt: default_prompt(),
            credits: default_credits(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let value = std::env::var(&result[start + 2..start + end]).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quiz.toml` in the current directory
/// 2. `~/.config/quizcli/config.toml`
///
/// `QUIZCLI_STORE` overrides the store with a JSON document at that path.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quiz.toml");
            if local.exists() {
                Some(local)
            } else {
                config_dir()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Ok(store) = std::env::var("QUIZCLI_STORE") {
        config.store = StoreConfig::Json {
            path: PathBuf::from(store),
        };
    }

    if let StoreConfig::Json { path } = &mut config.store {
        *path = resolve_path(path);
    }
    config.history_file = config.history_file.as_deref().map(resolve_path);

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizcli"))
}

/// Open the repository a store configuration describes.
pub async fn open_repository(
    store: &StoreConfig,
    seed_defaults: bool,
) -> Result<Arc<dyn QuizRepository>> {
    match store {
        StoreConfig::Json { path } => {
            let repo = JsonFileRepository::open(path.clone(), seed_defaults).await?;
            Ok(Arc::new(repo))
        }
        StoreConfig::Memory => {
            let repo = if seed_defaults {
                MemoryRepository::seeded()
            } else {
                MemoryRepository::new()
            };
            Ok(Arc::new(repo))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZCLI_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZCLI_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZCLI_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_vars"), "no_vars");
        assert_eq!(resolve_env_vars("${unclosed"), "${unclosed");
        std::env::remove_var("_QUIZCLI_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(
            config.store,
            StoreConfig::Json {
                path: PathBuf::from("quizzes.json")
            }
        );
        assert!(config.seed_defaults);
        assert_eq!(config.prompt, "quiz> ");
        assert!(config.history_file.is_none());
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
seed_defaults = false
prompt = "> "
credits = ["Ada", "Grace"]
history_file = "/tmp/quiz_history"

[store]
type = "json"
path = "/var/lib/quiz/quizzes.json"
"#;
        let config: QuizConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.seed_defaults);
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.credits, vec!["Ada", "Grace"]);
        assert_eq!(
            config.store,
            StoreConfig::Json {
                path: PathBuf::from("/var/lib/quiz/quizzes.json")
            }
        );
    }

    #[test]
    fn parse_memory_store() {
        let config: QuizConfig = toml::from_str("[store]\ntype = \"memory\"\n").unwrap();
        assert_eq!(config.store, StoreConfig::Memory);
        assert!(config.seed_defaults);
    }

    #[test]
    fn explicit_missing_config_fails() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.toml");
        std::fs::write(&path, "prompt = \">> \"\n[store]\ntype = \"memory\"\n").unwrap();

        let config = load_config_from(Some(path.as_path())).unwrap();
        assert_eq!(config.prompt, ">> ");
    }

    #[tokio::test]
    async fn open_memory_repository() {
        let repo = open_repository(&StoreConfig::Memory, true).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 4);

        let repo = open_repository(&StoreConfig::Memory, false).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
