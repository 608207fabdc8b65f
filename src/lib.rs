//! Pong League - Elo ratings and match records for a fixed roster
//!
//! This crate provides the core of a table-tennis leaderboard: a submit/
//! confirm/reject match workflow, Elo-style rating updates with streak
//! tracking, derived standings and statistics, and a crash-safe file store
//! guarded by a cross-process advisory lock. It is a library with an
//! in-process call contract; login, rendering, and transport belong to the
//! surrounding application.

pub mod config;
pub mod error;
pub mod ledger;
pub mod rating;
pub mod roster;
pub mod stats;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LeagueError, Result};
pub use types::*;

// Re-export key components
pub use config::AppConfig;
pub use ledger::MatchLedger;
pub use roster::{RosterProvider, StaticRosterProvider};
pub use store::FileStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
