//! Match configuration.

use super::types::{Dimension, Player};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable naming a config file for the host binary.
pub const CONFIG_ENV_VAR: &str = "STRICTLY_TRIS_CONFIG";

/// Tunables for one match. Every key is optional in the TOML form.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Board side length at match start.
    #[serde(default)]
    dimension: Dimension,

    /// Planned rounds; a player wins the match past half of this.
    #[serde(default = "default_max_rounds")]
    max_rounds: u32,

    /// How long Won/Drawn stay on screen before the round resolves.
    #[serde(default = "default_presentation_delay_ms")]
    presentation_delay_ms: u64,

    /// How many history entries the presentation layer shows.
    #[serde(default = "default_history_window")]
    history_window: usize,

    /// Who opens the first round.
    #[serde(default = "default_first_player")]
    first_player: Player,
}

#[instrument]
fn default_max_rounds() -> u32 {
    9
}

#[instrument]
fn default_presentation_delay_ms() -> u64 {
    2000
}

#[instrument]
fn default_history_window() -> usize {
    9
}

#[instrument]
fn default_first_player() -> Player {
    Player::X
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::default(),
            max_rounds: default_max_rounds(),
            presentation_delay_ms: default_presentation_delay_ms(),
            history_window: default_history_window(),
            first_player: default_first_player(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            dimension = config.dimension.get(),
            max_rounds = config.max_rounds,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::new("max_rounds must be at least 1".to_string()));
        }
        if self.history_window == 0 {
            return Err(ConfigError::new(
                "history_window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Presentation delay as a [`Duration`].
    pub fn presentation_delay(&self) -> Duration {
        Duration::from_millis(self.presentation_delay_ms)
    }

    /// True once `wins` is more than half of the planned rounds.
    pub fn is_match_point(&self, wins: u32) -> bool {
        u64::from(wins) * 2 > u64::from(self.max_rounds)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
