//! Error types for the league core
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

use std::path::PathBuf;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific league scenarios
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("Invalid match submission: {reason}")]
    Validation { reason: String },

    #[error("Player {actor} is not allowed to resolve match {match_id}")]
    Authorization { actor: String, match_id: String },

    #[error("Player not found: {player_id}")]
    PlayerNotFound { player_id: String },

    #[error("Pending match not found: {match_id}")]
    MatchNotFound { match_id: String },

    #[error("Store lock at {path:?} is held by another session")]
    Concurrency { path: PathBuf },

    #[error("Persistence failure: {message}")]
    Persistence { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl LeagueError {
    /// Downcast helper for callers that need to branch on the error kind
    pub fn from_anyhow(err: &anyhow::Error) -> Option<&LeagueError> {
        err.downcast_ref::<LeagueError>()
    }
}
