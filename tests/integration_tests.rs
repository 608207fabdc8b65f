//! Integration tests for the league core
//!
//! These tests exercise the whole system working together: the submit/
//! confirm/reject workflow, rating and record updates, derived statistics,
//! durable persistence across ledger instances, and lock contention.

mod fixtures;

use fixtures::{create_test_league, ledger_at, test_config};
use pong_league::error::LeagueError;
use pong_league::store::StoreLock;

fn kind(err: &anyhow::Error) -> &LeagueError {
    LeagueError::from_anyhow(err).expect("expected a LeagueError")
}

#[test]
fn complete_submit_and_confirm_workflow() {
    let (ledger, _dir) = create_test_league();

    // ada reports an 11-9 win over grace
    let submitted = ledger.submit_match("ada", "grace", 11, 9).unwrap();
    assert_eq!(submitted.winner, "ada");
    assert_eq!(submitted.loser, "grace");
    assert_eq!(submitted.winner_score, 11);
    assert_eq!(submitted.loser_score, 9);
    assert_eq!(submitted.submitter, "ada");
    assert_eq!(submitted.confirmer, "grace");

    // The match sits in grace's confirmation inbox, nobody else's
    assert_eq!(ledger.pending_count_for("grace").unwrap(), 1);
    assert_eq!(ledger.pending_count_for("ada").unwrap(), 0);

    let confirmed = ledger.confirm_match(&submitted.id, "grace").unwrap();
    assert!(confirmed.confirmed);
    assert_eq!(confirmed.winner_old_elo, 1500);
    assert_eq!(confirmed.loser_old_elo, 1500);
    assert_eq!(confirmed.winner_elo_change, 16);
    assert_eq!(confirmed.loser_elo_change, -16);

    // Queue drained, history gained the match
    assert_eq!(ledger.pending_count_for("grace").unwrap(), 0);
    let history = ledger.recent_history(10).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].details.id, submitted.id);

    // Both records reflect exactly one confirmed match
    let standings = ledger.standings().unwrap();
    assert_eq!(standings[0].0, "ada");
    assert_eq!(standings[0].1.rating, 1516);
    assert_eq!(standings[0].1.wins, 1);
    assert_eq!(standings[0].1.point_diff, 2);
    assert_eq!(standings[0].1.current_streak, 1);

    let grace = standings
        .iter()
        .find(|(player, _)| player == "grace")
        .map(|(_, record)| record.clone())
        .unwrap();
    assert_eq!(grace.rating, 1484);
    assert_eq!(grace.losses, 1);
    assert_eq!(grace.point_diff, -2);
    assert_eq!(grace.current_streak, -1);
    assert_eq!(grace.worst_streak, -1);
}

#[test]
fn losing_submitter_still_produces_correct_winner() {
    let (ledger, _dir) = create_test_league();

    // grace reports her own 7-11 loss to ada
    let submitted = ledger.submit_match("grace", "ada", 7, 11).unwrap();
    assert_eq!(submitted.winner, "ada");
    assert_eq!(submitted.loser, "grace");
    assert_eq!(submitted.submitter, "grace");
    assert_eq!(submitted.confirmer, "ada");

    let confirmed = ledger.confirm_match(&submitted.id, "ada").unwrap();
    assert_eq!(confirmed.details.winner, "ada");
    assert_eq!(confirmed.winner_elo_change, 16);
}

#[test]
fn reject_drops_the_match_without_rating_effect() {
    let (ledger, _dir) = create_test_league();

    let submitted = ledger.submit_match("ada", "grace", 11, 3).unwrap();
    ledger.reject_match(&submitted.id, "grace").unwrap();

    assert_eq!(ledger.pending_count_for("grace").unwrap(), 0);
    assert!(ledger.recent_history(10).unwrap().is_empty());

    for (_, record) in ledger.standings().unwrap() {
        assert_eq!(record.rating, 1500);
        assert_eq!(record.matches, 0);
    }
}

#[test]
fn only_the_designated_confirmer_may_resolve() {
    let (ledger, _dir) = create_test_league();
    let submitted = ledger.submit_match("ada", "grace", 11, 9).unwrap();

    // Neither the submitter nor a third player may confirm or reject
    for actor in ["ada", "margaret"] {
        let err = ledger.confirm_match(&submitted.id, actor).unwrap_err();
        assert!(matches!(kind(&err), LeagueError::Authorization { .. }));

        let err = ledger.reject_match(&submitted.id, actor).unwrap_err();
        assert!(matches!(kind(&err), LeagueError::Authorization { .. }));
    }

    // The failed attempts left every table untouched
    assert_eq!(ledger.pending_count_for("grace").unwrap(), 1);
    assert!(ledger.recent_history(10).unwrap().is_empty());
    for (_, record) in ledger.standings().unwrap() {
        assert_eq!(record.rating, 1500);
    }
}

#[test]
fn unknown_and_already_resolved_ids_are_not_found() {
    let (ledger, _dir) = create_test_league();

    let err = ledger.confirm_match("no-such-match", "grace").unwrap_err();
    assert!(matches!(kind(&err), LeagueError::MatchNotFound { .. }));

    let submitted = ledger.submit_match("ada", "grace", 11, 9).unwrap();
    ledger.confirm_match(&submitted.id, "grace").unwrap();

    // Confirmed is terminal: a second resolution attempt finds nothing
    let err = ledger.confirm_match(&submitted.id, "grace").unwrap_err();
    assert!(matches!(kind(&err), LeagueError::MatchNotFound { .. }));
    let err = ledger.reject_match(&submitted.id, "grace").unwrap_err();
    assert!(matches!(kind(&err), LeagueError::MatchNotFound { .. }));
}

#[test]
fn submissions_are_validated_before_any_state_change() {
    let (ledger, _dir) = create_test_league();

    for (score_self, score_opponent) in [(9, 9), (-1, 5), (51, 5), (5, 51), (0, 0)] {
        let err = ledger
            .submit_match("ada", "grace", score_self, score_opponent)
            .unwrap_err();
        assert!(matches!(kind(&err), LeagueError::Validation { .. }));
    }

    let err = ledger.submit_match("ada", "ada", 11, 9).unwrap_err();
    assert!(matches!(kind(&err), LeagueError::Validation { .. }));

    let err = ledger.submit_match("ada", "stranger", 11, 9).unwrap_err();
    assert!(matches!(kind(&err), LeagueError::PlayerNotFound { .. }));

    assert_eq!(ledger.pending_count_for("grace").unwrap(), 0);
    assert_eq!(ledger.pending_count_for("ada").unwrap(), 0);
}

#[test]
fn history_is_newest_first() {
    let (ledger, _dir) = create_test_league();

    let first = ledger.submit_match("ada", "grace", 11, 9).unwrap();
    ledger.confirm_match(&first.id, "grace").unwrap();
    let second = ledger.submit_match("margaret", "ada", 11, 5).unwrap();
    ledger.confirm_match(&second.id, "ada").unwrap();

    let history = ledger.recent_history(10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].details.id, second.id);
    assert_eq!(history[1].details.id, first.id);

    let latest_only = ledger.recent_history(1).unwrap();
    assert_eq!(latest_only.len(), 1);
    assert_eq!(latest_only[0].details.id, second.id);
}

#[test]
fn state_survives_across_ledger_instances() {
    let dir = tempfile::tempdir().unwrap();

    let submitted = {
        let ledger = ledger_at(dir.path());
        let submitted = ledger.submit_match("ada", "grace", 11, 9).unwrap();
        ledger.confirm_match(&submitted.id, "grace").unwrap();
        ledger.submit_match("grace", "margaret", 11, 6).unwrap()
    };

    // A fresh ledger over the same directory sees both the confirmed
    // history and the still-pending submission.
    let reopened = ledger_at(dir.path());
    assert_eq!(reopened.recent_history(10).unwrap().len(), 1);
    assert_eq!(reopened.pending_for("margaret").unwrap()[0].id, submitted.id);

    let standings = reopened.standings().unwrap();
    assert_eq!(standings[0].0, "ada");
    assert_eq!(standings[0].1.rating, 1516);
}

#[test]
fn concurrent_mutation_fails_fast_on_lock_contention() {
    let (ledger, dir) = create_test_league();
    let submitted = ledger.submit_match("ada", "grace", 11, 9).unwrap();

    let lock_path = test_config(dir.path()).storage.lock_path();
    let guard = StoreLock::acquire(&lock_path).unwrap();

    // Every mutation fails immediately while another session holds the lock
    let err = ledger.submit_match("grace", "margaret", 11, 2).unwrap_err();
    assert!(matches!(kind(&err), LeagueError::Concurrency { .. }));
    let err = ledger.confirm_match(&submitted.id, "grace").unwrap_err();
    assert!(matches!(kind(&err), LeagueError::Concurrency { .. }));
    let err = ledger.reject_match(&submitted.id, "grace").unwrap_err();
    assert!(matches!(kind(&err), LeagueError::Concurrency { .. }));

    // Read-only aggregation never takes the lock
    assert_eq!(ledger.standings().unwrap().len(), 3);

    drop(guard);
    ledger.confirm_match(&submitted.id, "grace").unwrap();
}

#[test]
fn failed_save_during_confirm_leaves_pre_operation_state() {
    let (ledger, dir) = create_test_league();
    let submitted = ledger.submit_match("ada", "grace", 11, 9).unwrap();

    // Block the history write mid-save: the temporary sibling cannot be
    // created over a directory, so player and pending tables are already
    // replaced when the failure hits.
    let obstruction = dir.path().join("match_history.json.tmp");
    std::fs::create_dir(&obstruction).unwrap();

    let err = ledger.confirm_match(&submitted.id, "grace").unwrap_err();
    assert!(matches!(kind(&err), LeagueError::Persistence { .. }));

    std::fs::remove_dir(&obstruction).unwrap();

    // No rating applied, the match is still pending, history never gained it
    for (_, record) in ledger.standings().unwrap() {
        assert_eq!(record.rating, 1500);
        assert_eq!(record.matches, 0);
    }
    assert_eq!(ledger.pending_for("grace").unwrap().len(), 1);
    assert!(ledger.recent_history(10).unwrap().is_empty());

    // The retained pending match can still be confirmed once the store heals
    let confirmed = ledger.confirm_match(&submitted.id, "grace").unwrap();
    assert_eq!(confirmed.winner_elo_change, 16);
}

#[test]
fn head_to_head_tracks_only_the_selected_pair() {
    let (ledger, _dir) = create_test_league();

    for (submitter, opponent, a, b) in [
        ("ada", "grace", 11, 7),
        ("grace", "ada", 11, 9),
        ("ada", "margaret", 11, 2),
    ] {
        let submitted = ledger.submit_match(submitter, opponent, a, b).unwrap();
        ledger.confirm_match(&submitted.id, opponent).unwrap();
    }

    let summary = ledger.head_to_head("ada", "grace").unwrap();
    assert_eq!(summary.total_matches, 2);
    assert_eq!(summary.p1_wins, 1);
    assert_eq!(summary.p2_wins, 1);
    assert_eq!(summary.p1_points, 11 + 9);
    assert_eq!(summary.p2_points, 7 + 11);

    let empty = ledger.head_to_head("grace", "margaret").unwrap();
    assert_eq!(empty.total_matches, 0);
}

#[test]
fn player_stats_accumulate_over_confirmed_matches() {
    let (ledger, _dir) = create_test_league();

    for (submitter, opponent, a, b) in [("ada", "grace", 11, 7), ("ada", "grace", 11, 9)] {
        let submitted = ledger.submit_match(submitter, opponent, a, b).unwrap();
        ledger.confirm_match(&submitted.id, opponent).unwrap();
    }

    let stats = ledger.player_stats("ada").unwrap();
    assert_eq!(stats.win_rate, 100.0);
    assert_eq!(stats.avg_points_scored, 11.0);
    assert_eq!(stats.avg_points_conceded, 8.0);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.best_streak, 2);

    let err = ledger.player_stats("stranger").unwrap_err();
    assert!(matches!(kind(&err), LeagueError::PlayerNotFound { .. }));
}
