//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use ultimate_tictactoe::Player;

/// Search depths and starting options for the drivers.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Search depth used when answering the judge.
    #[serde(default = "default_judge_depth")]
    judge_depth: u32,

    /// Initial console level, which is also the AI's search depth.
    #[serde(default = "default_start_level")]
    start_level: u32,

    /// Self-play search depth for X.
    #[serde(default = "default_depth_x")]
    depth_x: u32,

    /// Self-play search depth for O.
    #[serde(default = "default_depth_o")]
    depth_o: u32,

    /// Player that moves first in self-play.
    #[serde(default = "default_first_player")]
    first_player: Player,
}

fn default_judge_depth() -> u32 {
    4
}

fn default_start_level() -> u32 {
    1
}

fn default_depth_x() -> u32 {
    1
}

fn default_depth_o() -> u32 {
    10
}

fn default_first_player() -> Player {
    Player::X
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            judge_depth: default_judge_depth(),
            start_level: default_start_level(),
            depth_x: default_depth_x(),
            depth_o: default_depth_o(),
            first_player: default_first_player(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(ConfigErrorKind::Read, e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse, e.to_string()))?;

        info!(?config, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

/// Stage of loading that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// The file could not be read.
    #[display("read")]
    Read,
    /// The file is not valid TOML for [`GameConfig`].
    #[display("parse")]
    Parse,
}

/// Configuration error, tagged with where it was raised.
#[derive(Debug, Clone, Display, Error)]
#[display("Failed to {kind} config: {message} ({file}:{line})")]
pub struct ConfigError {
    /// Which stage failed.
    pub kind: ConfigErrorKind,
    /// Underlying failure.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates an error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            message,
            line: location.line(),
            file: location.file(),
        }
    }
}
