//! Strictly Tris - terminal host
//!
//! Drives a [`MatchEngine`] from stdin and carries out the effects it
//! returns.

#![warn(missing_docs)]

mod cli;
mod host;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use host::Host;
use std::path::PathBuf;
use strictly_tris::{CONFIG_ENV_VAR, Dimension, MatchConfig, MatchEngine};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            size,
            delay_ms,
            json,
        } => run_play(config, size, delay_ms, json).await,
        Command::Config { config } => show_config(config),
    }
}

/// Run an interactive match on stdin/stdout
#[instrument]
async fn run_play(
    config_path: Option<PathBuf>,
    size: Option<usize>,
    delay_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(size) = size {
        let dimension = Dimension::new(size).context("Invalid --size")?;
        config = config.with_dimension(dimension);
    }
    if let Some(delay_ms) = delay_ms {
        config = config.with_presentation_delay_ms(delay_ms);
    }

    info!(?config, "Starting terminal match");
    let engine = MatchEngine::new(config);
    Host::new(engine, json).run().await
}

/// Print the effective config
#[instrument]
fn show_config(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    let rendered = toml::to_string(&config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

/// Load the config from an explicit path, the environment, or defaults
#[instrument]
fn load_config(path: Option<PathBuf>) -> Result<MatchConfig> {
    let path = path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

    match path {
        Some(path) => Ok(MatchConfig::from_file(&path)
            .with_context(|| format!("Loading {}", path.display()))?),
        None => {
            debug!("No config file given; using defaults");
            Ok(MatchConfig::default())
        }
    }
}
