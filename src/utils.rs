//! Utility functions for the league core

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::types::MatchId;

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Generate a match id from the submission instant.
///
/// The RFC 3339 prefix keeps ids monotonically informative (sortable by
/// submission time); the uuid suffix keeps them unique even for submissions
/// landing in the same microsecond.
pub fn generate_match_id(timestamp: DateTime<Utc>) -> MatchId {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}",
        timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
        &suffix[..8]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let now = current_timestamp();
        let id1 = generate_match_id(now);
        let id2 = generate_match_id(now);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_ids_sort_by_submission_time() {
        let earlier = generate_match_id("2024-05-01T10:00:00Z".parse().unwrap());
        let later = generate_match_id("2024-05-01T10:00:01Z".parse().unwrap());
        assert!(earlier < later);
    }
}
