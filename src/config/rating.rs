//! Rating system configuration

use serde::{Deserialize, Serialize};

use crate::error::{LeagueError, Result};

/// Parameters of the Elo update and of score validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSettings {
    /// K-factor scaling the magnitude of rating change per match
    pub k_factor: f64,
    /// Rating assigned to roster entries that have never played
    pub initial_rating: i32,
    /// Inclusive upper bound for a single game score
    pub max_score: i32,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 32.0,
            initial_rating: 1500,
            max_score: 50,
        }
    }
}

impl RatingSettings {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(LeagueError::Configuration {
                message: "K-factor must be positive".to_string(),
            }
            .into());
        }

        if self.max_score <= 0 {
            return Err(LeagueError::Configuration {
                message: "Maximum score must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
