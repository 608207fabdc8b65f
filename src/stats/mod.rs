//! Read-only derived views over the league tables
//!
//! Nothing in this module persists state or takes the store lock; every view
//! is recomputed on demand from whatever the store currently holds.

pub mod aggregator;

// Re-export commonly used functions
pub use aggregator::{head_to_head, player_stats, standings};
