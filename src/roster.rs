//! Roster provider traits and implementations
//!
//! The core never owns credentials or profiles; the surrounding application
//! injects a registry of player identifiers and the core treats them as
//! opaque. This module defines that seam and a static implementation backed
//! by an in-memory list or a TOML document.

use serde::Deserialize;
use std::path::Path;

use crate::error::{LeagueError, Result};
use crate::types::PlayerId;

/// Trait for supplying the fixed set of registered players
#[cfg_attr(test, mockall::automock)]
pub trait RosterProvider: Send + Sync {
    /// All registered player ids, in roster order.
    ///
    /// Roster order is meaningful: standings keep it for equal ratings.
    fn player_ids(&self) -> Vec<PlayerId>;

    /// Whether the given identifier belongs to a registered player
    fn is_registered(&self, player_id: &str) -> bool;
}

/// Shape of a roster TOML document: `players = ["ada", "grace", ...]`
#[derive(Debug, Deserialize)]
struct RosterDocument {
    players: Vec<PlayerId>,
}

/// Static roster provider backed by a fixed list of player ids
#[derive(Debug, Clone)]
pub struct StaticRosterProvider {
    players: Vec<PlayerId>,
}

impl StaticRosterProvider {
    /// Create a roster from an explicit list of player ids
    pub fn new(players: Vec<PlayerId>) -> Result<Self> {
        if players.is_empty() {
            return Err(LeagueError::Configuration {
                message: "Roster must contain at least one player".to_string(),
            }
            .into());
        }

        for (idx, player) in players.iter().enumerate() {
            if player.trim().is_empty() {
                return Err(LeagueError::Configuration {
                    message: "Roster entries must be non-empty identifiers".to_string(),
                }
                .into());
            }
            if players[..idx].contains(player) {
                return Err(LeagueError::Configuration {
                    message: format!("Duplicate roster entry: {player}"),
                }
                .into());
            }
        }

        Ok(Self { players })
    }

    /// Parse a roster from a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let document: RosterDocument =
            toml::from_str(contents).map_err(|e| LeagueError::Configuration {
                message: format!("Invalid roster document: {e}"),
            })?;
        Self::new(document.players)
    }

    /// Load a roster from a TOML file on disk
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| LeagueError::Configuration {
            message: format!("Failed to read roster file {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&contents)
    }
}

impl RosterProvider for StaticRosterProvider {
    fn player_ids(&self) -> Vec<PlayerId> {
        self.players.clone()
    }

    fn is_registered(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p == player_id)
    }
}
