//! Match validation rules
//!
//! Every match is validated before it is trusted: on submission and again
//! when read back from storage. Scores must be decisive, in range, and not
//! both zero; both sides must be distinct registered players.

use crate::error::{LeagueError, Result};
use crate::roster::RosterProvider;
use crate::types::Match;

/// Validate a raw submission before a `Match` is built from it
pub fn validate_submission(
    submitter: &str,
    opponent: &str,
    score_self: i32,
    score_opponent: i32,
    roster: &dyn RosterProvider,
    max_score: i32,
) -> Result<()> {
    if submitter == opponent {
        return Err(LeagueError::Validation {
            reason: "A player cannot submit a match against themselves".to_string(),
        }
        .into());
    }

    for player in [submitter, opponent] {
        if !roster.is_registered(player) {
            return Err(LeagueError::PlayerNotFound {
                player_id: player.to_string(),
            }
            .into());
        }
    }

    validate_scores(score_self, score_opponent, max_score)
}

/// Validate the score pair of a submission
pub fn validate_scores(score_a: i32, score_b: i32, max_score: i32) -> Result<()> {
    if score_a == score_b {
        return Err(LeagueError::Validation {
            reason: "Scores cannot be tied".to_string(),
        }
        .into());
    }

    if score_a < 0 || score_b < 0 {
        return Err(LeagueError::Validation {
            reason: "Scores cannot be negative".to_string(),
        }
        .into());
    }

    if score_a > max_score || score_b > max_score {
        return Err(LeagueError::Validation {
            reason: format!("Scores cannot exceed {max_score}"),
        }
        .into());
    }

    if score_a == 0 && score_b == 0 {
        return Err(LeagueError::Validation {
            reason: "At least one side must have scored".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validate a stored match before trusting it after a load
pub fn validate_stored_match(
    record: &Match,
    roster: &dyn RosterProvider,
    max_score: i32,
) -> Result<()> {
    if record.id.is_empty() {
        return Err(LeagueError::Validation {
            reason: "Match id is missing".to_string(),
        }
        .into());
    }

    if record.winner == record.loser {
        return Err(LeagueError::Validation {
            reason: "Winner and loser must differ".to_string(),
        }
        .into());
    }

    if record.winner_score <= record.loser_score {
        return Err(LeagueError::Validation {
            reason: "Winner score must exceed loser score".to_string(),
        }
        .into());
    }

    for player in [&record.winner, &record.loser] {
        if !roster.is_registered(player) {
            return Err(LeagueError::PlayerNotFound {
                player_id: player.clone(),
            }
            .into());
        }
    }

    validate_scores(record.winner_score, record.loser_score, max_score)
}
