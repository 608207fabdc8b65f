//! Match ledger implementation
//!
//! The ledger owns the submit/confirm/reject workflow. Each pending match is
//! resolved by exactly one action from its designated confirmer: confirmation
//! runs the rating engine and moves the match to history, rejection drops it
//! with no rating effect. Every mutation runs a whole lock-load-modify-save
//! cycle so concurrent sessions can never interleave.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::app::AppConfig;
use crate::error::{LeagueError, Result};
use crate::ledger::validation::{validate_stored_match, validate_submission};
use crate::rating::elo::{apply_streak, EloRatingEngine};
use crate::roster::RosterProvider;
use crate::stats::aggregator;
use crate::store::file::FileStore;
use crate::types::{
    ConfirmedMatch, HeadToHead, LeagueData, Match, PlayerId, PlayerRecord, PlayerStats,
};
use crate::utils::{current_timestamp, generate_match_id};

/// The core entry point for mutations and queries against the league
pub struct MatchLedger {
    store: FileStore,
    roster: Arc<dyn RosterProvider>,
    engine: EloRatingEngine,
    max_score: i32,
}

impl MatchLedger {
    /// Create a ledger over a file store rooted at the configured data directory
    pub fn new(config: AppConfig, roster: Arc<dyn RosterProvider>) -> Result<Self> {
        crate::config::app::validate_config(&config)?;

        let engine = EloRatingEngine::new(config.rating.clone())?;
        let store = FileStore::new(
            config.storage.clone(),
            Arc::clone(&roster),
            config.rating.initial_rating,
        )?;

        Ok(Self {
            store,
            roster,
            engine,
            max_score: config.rating.max_score,
        })
    }

    /// Submit a match result on behalf of `submitter`.
    ///
    /// Winner and loser are derived from the score comparison; the opponent
    /// becomes the designated confirmer. Returns the created pending match.
    pub fn submit_match(
        &self,
        submitter: &str,
        opponent: &str,
        score_self: i32,
        score_opponent: i32,
    ) -> Result<Match> {
        validate_submission(
            submitter,
            opponent,
            score_self,
            score_opponent,
            self.roster.as_ref(),
            self.max_score,
        )?;

        let (winner, loser) = if score_self > score_opponent {
            (submitter, opponent)
        } else {
            (opponent, submitter)
        };

        let timestamp = current_timestamp();
        let record = Match {
            id: generate_match_id(timestamp),
            winner: winner.to_string(),
            loser: loser.to_string(),
            winner_score: score_self.max(score_opponent),
            loser_score: score_self.min(score_opponent),
            submitter: submitter.to_string(),
            confirmer: opponent.to_string(),
            timestamp,
        };

        let _guard = self.store.lock()?;
        let mut data = self.load_trusted()?;
        data.pending.push(record.clone());
        self.store.save(&data)?;

        info!(
            match_id = %record.id,
            winner = %record.winner,
            loser = %record.loser,
            confirmer = %record.confirmer,
            "Match submitted, awaiting confirmation"
        );
        Ok(record)
    }

    /// Confirm a pending match as `actor`, applying rating and record updates.
    ///
    /// Fails with `MatchNotFound` for unknown or already-resolved ids and
    /// with `Authorization` when the actor is not the designated confirmer;
    /// neither failure touches any table.
    pub fn confirm_match(&self, match_id: &str, actor: &str) -> Result<ConfirmedMatch> {
        let _guard = self.store.lock()?;
        let mut data = self.load_trusted()?;

        let index = Self::find_pending(&data, match_id, actor)?;
        let pending = data.pending.remove(index);

        let confirmed = self.apply_confirmation(&mut data.players, pending)?;
        data.history.insert(0, confirmed.clone());

        self.store.save(&data)?;

        info!(
            match_id = %confirmed.details.id,
            winner = %confirmed.details.winner,
            winner_delta = confirmed.winner_elo_change,
            loser = %confirmed.details.loser,
            loser_delta = confirmed.loser_elo_change,
            "Match confirmed"
        );
        Ok(confirmed)
    }

    /// Reject a pending match as `actor`, dropping it with no rating effect
    pub fn reject_match(&self, match_id: &str, actor: &str) -> Result<()> {
        let _guard = self.store.lock()?;
        let mut data = self.load_trusted()?;

        let index = Self::find_pending(&data, match_id, actor)?;
        let rejected = data.pending.remove(index);

        self.store.save(&data)?;

        info!(match_id = %rejected.id, rejected_by = %actor, "Match rejected");
        Ok(())
    }

    /// All players sorted by rating descending; equal ratings keep roster order
    pub fn standings(&self) -> Result<Vec<(PlayerId, PlayerRecord)>> {
        let data = self.load_trusted()?;
        Ok(aggregator::standings(
            &self.roster.player_ids(),
            &data.players,
        ))
    }

    /// Derived statistics for one player
    pub fn player_stats(&self, player: &str) -> Result<PlayerStats> {
        let data = self.load_trusted()?;
        let record = data
            .players
            .get(player)
            .ok_or_else(|| LeagueError::PlayerNotFound {
                player_id: player.to_string(),
            })?;
        Ok(aggregator::player_stats(record))
    }

    /// Aggregate win/point record between two players over confirmed history
    pub fn head_to_head(&self, p1: &str, p2: &str) -> Result<HeadToHead> {
        let data = self.load_trusted()?;
        Ok(aggregator::head_to_head(&data.history, p1, p2))
    }

    /// Pending matches awaiting confirmation from this actor
    pub fn pending_for(&self, actor: &str) -> Result<Vec<Match>> {
        let data = self.load_trusted()?;
        Ok(data
            .pending
            .into_iter()
            .filter(|m| m.confirmer == actor)
            .collect())
    }

    /// Number of pending matches awaiting confirmation from this actor
    pub fn pending_count_for(&self, actor: &str) -> Result<usize> {
        Ok(self.pending_for(actor)?.len())
    }

    /// Newest-first slice of confirmed history
    pub fn recent_history(&self, limit: usize) -> Result<Vec<ConfirmedMatch>> {
        let mut history = self.load_trusted()?.history;
        history.truncate(limit);
        Ok(history)
    }

    /// Load the store and drop pending matches that no longer validate.
    ///
    /// Lossy by design: one corrupt submission must not wedge the queue.
    fn load_trusted(&self) -> Result<LeagueData> {
        let mut data = self.store.load()?;
        data.pending.retain(|record| {
            match validate_stored_match(record, self.roster.as_ref(), self.max_score) {
                Ok(()) => true,
                Err(e) => {
                    warn!(match_id = %record.id, error = %e, "Dropping invalid pending match");
                    false
                }
            }
        });
        Ok(data)
    }

    fn find_pending(data: &LeagueData, match_id: &str, actor: &str) -> Result<usize> {
        let index = data
            .pending
            .iter()
            .position(|m| m.id == match_id)
            .ok_or_else(|| LeagueError::MatchNotFound {
                match_id: match_id.to_string(),
            })?;

        if data.pending[index].confirmer != actor {
            return Err(LeagueError::Authorization {
                actor: actor.to_string(),
                match_id: match_id.to_string(),
            }
            .into());
        }

        Ok(index)
    }

    fn apply_confirmation(
        &self,
        players: &mut std::collections::BTreeMap<PlayerId, PlayerRecord>,
        pending: Match,
    ) -> Result<ConfirmedMatch> {
        let winner_old = Self::rating_of(players, &pending.winner)?;
        let loser_old = Self::rating_of(players, &pending.loser)?;

        let update = self.engine.rate(winner_old, loser_old);
        let swing = i64::from(pending.winner_score - pending.loser_score);

        if let Some(record) = players.get_mut(&pending.winner) {
            record.rating = update.winner_new;
            record.matches += 1;
            record.wins += 1;
            record.point_diff += swing;
            record.points_scored += pending.winner_score as u32;
            record.points_conceded += pending.loser_score as u32;
            apply_streak(record, true);
        }

        if let Some(record) = players.get_mut(&pending.loser) {
            record.rating = update.loser_new;
            record.matches += 1;
            record.losses += 1;
            record.point_diff -= swing;
            record.points_scored += pending.loser_score as u32;
            record.points_conceded += pending.winner_score as u32;
            apply_streak(record, false);
        }

        Ok(ConfirmedMatch {
            details: pending,
            confirmed: true,
            winner_elo_change: update.winner_delta,
            loser_elo_change: update.loser_delta,
            winner_old_elo: winner_old,
            loser_old_elo: loser_old,
        })
    }

    fn rating_of(
        players: &std::collections::BTreeMap<PlayerId, PlayerRecord>,
        player: &str,
    ) -> Result<i32> {
        players
            .get(player)
            .map(|record| record.rating)
            .ok_or_else(|| {
                LeagueError::PlayerNotFound {
                    player_id: player.to_string(),
                }
                .into()
            })
    }
}
