//! Common types used throughout the league core

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for players
pub type PlayerId = String;

/// Unique identifier for matches (timestamp-prefixed, see `utils::generate_match_id`)
pub type MatchId = String;

/// Durable per-player record, mutated only by confirmed-match processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub rating: i32,
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub point_diff: i64,
    pub points_scored: u32,
    pub points_conceded: u32,
    /// Positive run length of wins, negative of losses, 0 before any match
    pub current_streak: i32,
    pub best_streak: i32,
    pub worst_streak: i32,
}

impl PlayerRecord {
    /// Fresh record for a roster entry that has never played
    pub fn with_rating(rating: i32) -> Self {
        Self {
            rating,
            matches: 0,
            wins: 0,
            losses: 0,
            point_diff: 0,
            points_scored: 0,
            points_conceded: 0,
            current_streak: 0,
            best_streak: 0,
            worst_streak: 0,
        }
    }

    /// Structural consistency check used by the store before any write.
    ///
    /// All of these hold by construction for records produced by the ledger;
    /// a violation means the in-memory table was corrupted by the caller.
    pub fn is_structurally_valid(&self) -> bool {
        self.matches == self.wins + self.losses
            && self.best_streak >= 0
            && self.worst_streak <= 0
            && self.best_streak >= self.current_streak
            && self.worst_streak <= self.current_streak
    }
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self::with_rating(1500)
    }
}

/// A submitted match awaiting confirmation by the opposing player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub winner_score: i32,
    pub loser_score: i32,
    pub submitter: PlayerId,
    pub confirmer: PlayerId,
    pub timestamp: DateTime<Utc>,
}

/// A confirmed match as stored in history, with the rating movement it caused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedMatch {
    #[serde(flatten)]
    pub details: Match,
    pub confirmed: bool,
    pub winner_elo_change: i32,
    pub loser_elo_change: i32,
    pub winner_old_elo: i32,
    pub loser_old_elo: i32,
}

/// The three persisted tables as a single in-memory value.
///
/// `history` is newest first: confirmation prepends, nothing ever deletes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueData {
    pub players: BTreeMap<PlayerId, PlayerRecord>,
    pub pending: Vec<Match>,
    pub history: Vec<ConfirmedMatch>,
}

/// Derived per-player statistics (see `stats::aggregator`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub win_rate: f64,
    pub avg_points_scored: f64,
    pub avg_points_conceded: f64,
    pub current_streak: i32,
    pub best_streak: i32,
    pub worst_streak: i32,
}

/// Aggregate record between exactly two players across confirmed history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub p1_points: u32,
    pub p2_points: u32,
    pub total_matches: u32,
}
