//! Standings, per-player statistics, and head-to-head summaries

use std::collections::BTreeMap;

use crate::types::{ConfirmedMatch, HeadToHead, PlayerId, PlayerRecord, PlayerStats};

/// All players sorted by rating descending.
///
/// The sort is stable and seeded in roster order, so players with equal
/// ratings keep their roster positions rather than gaining an invented
/// secondary sort key.
pub fn standings(
    roster_order: &[PlayerId],
    players: &BTreeMap<PlayerId, PlayerRecord>,
) -> Vec<(PlayerId, PlayerRecord)> {
    let mut rows: Vec<(PlayerId, PlayerRecord)> = roster_order
        .iter()
        .filter_map(|player| {
            players
                .get(player)
                .map(|record| (player.clone(), record.clone()))
        })
        .collect();

    rows.sort_by(|a, b| b.1.rating.cmp(&a.1.rating));
    rows
}

/// Derived statistics for a single player record
pub fn player_stats(record: &PlayerRecord) -> PlayerStats {
    let matches = f64::from(record.matches);

    let (win_rate, avg_points_scored, avg_points_conceded) = if record.matches > 0 {
        (
            f64::from(record.wins) / matches * 100.0,
            f64::from(record.points_scored) / matches,
            f64::from(record.points_conceded) / matches,
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    PlayerStats {
        win_rate,
        avg_points_scored,
        avg_points_conceded,
        current_streak: record.current_streak,
        best_streak: record.best_streak,
        worst_streak: record.worst_streak,
    }
}

/// Aggregate win/point record between `p1` and `p2` over confirmed history.
///
/// One linear scan per call; no cached index.
pub fn head_to_head(history: &[ConfirmedMatch], p1: &str, p2: &str) -> HeadToHead {
    let mut summary = HeadToHead {
        p1_wins: 0,
        p2_wins: 0,
        p1_points: 0,
        p2_points: 0,
        total_matches: 0,
    };

    for record in history {
        if !record.confirmed {
            continue;
        }
        let details = &record.details;

        if details.winner == p1 && details.loser == p2 {
            summary.p1_wins += 1;
            summary.p1_points += details.winner_score as u32;
            summary.p2_points += details.loser_score as u32;
        } else if details.winner == p2 && details.loser == p1 {
            summary.p2_wins += 1;
            summary.p2_points += details.winner_score as u32;
            summary.p1_points += details.loser_score as u32;
        }
    }

    summary.total_matches = summary.p1_wins + summary.p2_wins;
    summary
}
