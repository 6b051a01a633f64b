//! Command-line interface for tally.

use clap::{Parser, Subcommand};

/// Tally - tic-tac-toe with a running score
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Tic-tac-toe with score tracking and a random-move opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal, reading commands from stdin
    Play {
        /// Path to a TOML session config
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,

        /// Let the computer play O
        #[arg(long)]
        ai: bool,

        /// Seed for the computer player's choices
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds the computer waits before moving
        #[arg(long)]
        ai_delay_ms: Option<u64>,

        /// Print events as JSON lines instead of a drawn board
        #[arg(long)]
        json: bool,
    },

    /// Print the default session config as TOML
    DefaultConfig,
}
