//! Main application configuration
//!
//! This module defines the primary configuration structures for the league
//! core, including environment variable loading and validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::config::rating::RatingSettings;
use crate::error::{LeagueError, Result};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub rating: RatingSettings,
}

/// Location and file names of the persisted tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the three tables, the lock file, and transient siblings
    pub data_dir: PathBuf,
    /// Player records table file name
    pub players_file: String,
    /// Pending matches table file name
    pub pending_file: String,
    /// Confirmed match history table file name
    pub history_file: String,
    /// Advisory lock file name
    pub lock_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./league-data"),
            players_file: "player_records.json".to_string(),
            pending_file: "pending_matches.json".to_string(),
            history_file: "match_history.json".to_string(),
            lock_file: "league.lock".to_string(),
        }
    }
}

impl StorageSettings {
    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(&self.players_file)
    }

    pub fn pending_path(&self) -> PathBuf {
        self.data_dir.join(&self.pending_file)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.data_dir.join(&self.lock_file)
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(data_dir) = env::var("PONG_LEAGUE_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(k_factor) = env::var("PONG_LEAGUE_K_FACTOR") {
            config.rating.k_factor =
                k_factor.parse().map_err(|_| LeagueError::Configuration {
                    message: format!("Invalid PONG_LEAGUE_K_FACTOR: {k_factor}"),
                })?;
        }

        if let Ok(initial) = env::var("PONG_LEAGUE_INITIAL_RATING") {
            config.rating.initial_rating =
                initial.parse().map_err(|_| LeagueError::Configuration {
                    message: format!("Invalid PONG_LEAGUE_INITIAL_RATING: {initial}"),
                })?;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate a complete configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.storage.data_dir.as_os_str().is_empty() {
        return Err(LeagueError::Configuration {
            message: "Data directory must not be empty".to_string(),
        }
        .into());
    }

    for name in [
        &config.storage.players_file,
        &config.storage.pending_file,
        &config.storage.history_file,
        &config.storage.lock_file,
    ] {
        if name.is_empty() {
            return Err(LeagueError::Configuration {
                message: "Table file names must not be empty".to_string(),
            }
            .into());
        }
    }

    config.rating.validate()
}
