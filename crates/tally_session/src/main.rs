//! Tally - terminal front end
//!
//! Plays scored tic-tac-toe rounds against a friend or a random-move
//! computer opponent.

#![warn(missing_docs)]

mod cli;
mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tally_session::SessionConfig;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            ai,
            seed,
            ai_delay_ms,
            json,
        } => run_play(config, ai, seed, ai_delay_ms, json).await,
        Command::DefaultConfig => {
            print!("{}", SessionConfig::default().to_toml()?);
            Ok(())
        }
    }
}

/// Run an interactive game session
#[instrument(skip_all, fields(config_path = ?config))]
async fn run_play(
    config: Option<PathBuf>,
    ai: bool,
    seed: Option<u64>,
    ai_delay_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut session_config = match &config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if ai {
        session_config = session_config.with_ai_enabled(true);
    }
    if seed.is_some() {
        session_config = session_config.with_rng_seed(seed);
    }
    if let Some(ms) = ai_delay_ms {
        session_config = session_config.with_ai_delay_ms(ms);
    }

    info!(?session_config, "Starting tally");
    let (session, events) = tally_session::spawn(&session_config);
    repl::run(session, events, json).await
}
