//! Command-line interface for strictly_tris.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Tris - N x N tic-tac-toe for two players at one keyboard
#[derive(Parser, Debug)]
#[command(name = "strictly_tris")]
#[command(about = "N x N tic-tac-toe match engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match in the terminal
    Play {
        /// Path to a TOML match config (falls back to STRICTLY_TRIS_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Board size, overriding the config
        #[arg(short, long)]
        size: Option<usize>,

        /// Presentation delay in milliseconds, overriding the config
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Print JSON snapshots instead of the ASCII board
        #[arg(long)]
        json: bool,
    },

    /// Print the effective match config as TOML
    Config {
        /// Path to a TOML match config (falls back to STRICTLY_TRIS_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
