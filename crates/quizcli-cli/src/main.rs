//! quiz — interactive quiz manager.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quizcli_core::CommandEngine;
use quizcli_store::{load_config_from, open_repository, StoreConfig};

mod console;
mod prompter;
mod repl;

use console::ConsoleReporter;
use prompter::RustylinePrompter;
use repl::Session;

#[derive(Parser)]
#[command(name = "quiz", version, about = "Interactive quiz manager")]
struct Cli {
    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON quiz store to use instead of the configured one
    #[arg(long, conflicts_with = "memory")]
    store: Option<PathBuf>,

    /// Keep quizzes in memory only
    #[arg(long)]
    memory: bool,

    /// Do not add the default quizzes to a newly created store
    #[arg(long)]
    no_seed: bool,

    /// Seed for the play order (random if unset)
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quizcli=warn,quiz=warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config_from(cli.config.as_deref())?;
    if cli.memory {
        config.store = StoreConfig::Memory;
    } else if let Some(path) = cli.store {
        config.store = StoreConfig::Json { path };
    }

    let repository = open_repository(&config.store, config.seed_defaults && !cli.no_seed).await?;
    let prompter = Arc::new(RustylinePrompter::new()?);
    let reporter = Arc::new(ConsoleReporter::new());

    let mut engine = CommandEngine::new(repository, prompter.clone(), reporter)
        .with_credits(config.credits.clone());
    if let Some(seed) = cli.seed {
        engine = engine.with_seed(seed);
    }

    Session::new(engine, prompter, config.prompt, config.history_file)
        .run()
        .await;
    Ok(())
}
