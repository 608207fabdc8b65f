//! Elo rating engine over the skillratings crate
//!
//! Ratings are persisted as integers. Both new ratings are rounded to the
//! nearest integer independently and each delta is its rounded new rating
//! minus the original, so the two deltas are not required to be equal in
//! magnitude or to sum to zero. That asymmetry is intentional behavior,
//! not a rounding bug to fix.

use skillratings::elo::{elo, EloConfig, EloRating};
use skillratings::Outcomes;

use crate::config::rating::RatingSettings;
use crate::error::Result;
use crate::types::PlayerRecord;

/// Outcome of a single rating calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingUpdate {
    pub winner_new: i32,
    pub loser_new: i32,
    pub winner_delta: i32,
    pub loser_delta: i32,
}

/// Elo rating calculator with integer rounding semantics
#[derive(Debug, Clone)]
pub struct EloRatingEngine {
    settings: RatingSettings,
}

impl EloRatingEngine {
    /// Create a new engine, validating the settings
    pub fn new(settings: RatingSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Rating assigned to players that have never played
    pub fn initial_rating(&self) -> i32 {
        self.settings.initial_rating
    }

    /// Compute new integer ratings and per-side deltas for a decided match.
    ///
    /// Expected score is the logistic function of the rating gap; the winner
    /// moves toward 1, the loser toward 0, both scaled by the K-factor.
    pub fn rate(&self, winner_rating: i32, loser_rating: i32) -> RatingUpdate {
        let winner = EloRating {
            rating: f64::from(winner_rating),
        };
        let loser = EloRating {
            rating: f64::from(loser_rating),
        };
        let config = EloConfig {
            k: self.settings.k_factor,
        };

        let (new_winner, new_loser) = elo(&winner, &loser, &Outcomes::WIN, &config);

        let winner_new = new_winner.rating.round() as i32;
        let loser_new = new_loser.rating.round() as i32;

        RatingUpdate {
            winner_new,
            loser_new,
            winner_delta: winner_new - winner_rating,
            loser_delta: loser_new - loser_rating,
        }
    }
}

/// Update a player's streak fields after a confirmed result.
///
/// A win extends a non-negative streak or resets a losing streak to +1;
/// a loss mirrors that. Best/worst high-water marks follow the new value.
pub fn apply_streak(record: &mut PlayerRecord, won: bool) {
    let current = record.current_streak;

    record.current_streak = if won {
        if current >= 0 {
            current + 1
        } else {
            1
        }
    } else if current <= 0 {
        current - 1
    } else {
        -1
    };

    record.best_streak = record.best_streak.max(record.current_streak);
    record.worst_streak = record.worst_streak.min(record.current_streak);
}
