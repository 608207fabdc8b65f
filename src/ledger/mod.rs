//! Match workflow state machine
//!
//! Submissions enter a pending queue and wait for the opposing player to
//! confirm or reject them. Confirmation is the only path that moves ratings.

pub mod manager;
pub mod validation;

// Re-export commonly used types
pub use manager::MatchLedger;
