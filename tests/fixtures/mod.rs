//! Shared fixtures for integration tests

use std::path::Path;
use std::sync::{Arc, Once};

use pong_league::config::AppConfig;
use pong_league::ledger::MatchLedger;
use pong_league::roster::StaticRosterProvider;
use tempfile::TempDir;

static INIT_LOGGING: Once = Once::new();

/// Route crate logs through the test harness, honoring `RUST_LOG`
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Default roster used by the integration tests, in roster order
pub const TEST_ROSTER: [&str; 3] = ["ada", "grace", "margaret"];

/// Build an `AppConfig` rooted at the given data directory
pub fn test_config(data_dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.data_dir = data_dir.to_path_buf();
    config
}

/// Build a ledger over a fresh temporary data directory
pub fn create_test_league() -> (MatchLedger, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let ledger = ledger_at(dir.path());
    (ledger, dir)
}

/// Build a second ledger over an existing data directory
pub fn ledger_at(data_dir: &Path) -> MatchLedger {
    init_test_logging();
    let roster = Arc::new(
        StaticRosterProvider::new(TEST_ROSTER.iter().map(|p| p.to_string()).collect())
            .expect("valid roster"),
    );
    MatchLedger::new(test_config(data_dir), roster).expect("failed to build ledger")
}
