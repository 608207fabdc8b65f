//! Elo rating updates and streak bookkeeping
//!
//! This module wraps the skillratings Elo implementation with the integer
//! rounding behavior the persisted tables use, and owns the win/loss streak
//! rule applied on match confirmation.

pub mod elo;

// Re-export commonly used types
pub use elo::{apply_streak, EloRatingEngine, RatingUpdate};
