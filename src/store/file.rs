//! JSON file store for the three league tables
//!
//! Each table lives in its own file inside the data directory. Loads are
//! deliberately lossy in the face of corruption: a broken player table is
//! preserved under a `.corrupt` sibling and reinitialized from the roster,
//! while broken pending entries are dropped one by one. Saves go through
//! snapshot-then-atomic-replace so a reader never observes a partial table.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::app::StorageSettings;
use crate::error::{LeagueError, Result};
use crate::roster::RosterProvider;
use crate::store::lock::StoreLock;
use crate::store::snapshot::TableSnapshot;
use crate::types::{ConfirmedMatch, LeagueData, Match, PlayerId, PlayerRecord};

/// Durable store for player records, pending matches, and match history
pub struct FileStore {
    settings: StorageSettings,
    roster: Arc<dyn RosterProvider>,
    initial_rating: i32,
}

impl FileStore {
    /// Create a store rooted at the configured data directory
    pub fn new(
        settings: StorageSettings,
        roster: Arc<dyn RosterProvider>,
        initial_rating: i32,
    ) -> Result<Self> {
        fs::create_dir_all(&settings.data_dir).map_err(|e| LeagueError::Persistence {
            message: format!(
                "Failed to create data directory {}: {e}",
                settings.data_dir.display()
            ),
        })?;

        Ok(Self {
            settings,
            roster,
            initial_rating,
        })
    }

    /// Acquire the cross-process mutation lock (try-once, fail-fast)
    pub fn lock(&self) -> Result<StoreLock> {
        StoreLock::acquire(&self.settings.lock_path())
    }

    /// Load all three tables, recovering lossily from missing or corrupt data
    pub fn load(&self) -> Result<LeagueData> {
        let players = self.load_players()?;
        let pending = self.load_pending();
        let history = self.load_history();

        debug!(
            players = players.len(),
            pending = pending.len(),
            history = history.len(),
            "Loaded league tables"
        );

        Ok(LeagueData {
            players,
            pending,
            history,
        })
    }

    /// Persist all three tables together or not at all.
    ///
    /// Every table is serialized and snapshotted before the first byte on
    /// disk is replaced; a failure on any write rolls all earlier
    /// replacements back to their pre-save versions before surfacing.
    pub fn save(&self, data: &LeagueData) -> Result<()> {
        if let Some((player, _)) = data
            .players
            .iter()
            .find(|(_, record)| !record.is_structurally_valid())
        {
            return Err(LeagueError::Persistence {
                message: format!("Refusing to write structurally invalid record for {player}"),
            }
            .into());
        }

        let tables = [
            (self.settings.players_path(), Self::encode(&data.players)?),
            (self.settings.pending_path(), Self::encode(&data.pending)?),
            (self.settings.history_path(), Self::encode(&data.history)?),
        ];

        let mut snapshots = Vec::with_capacity(tables.len());
        for (path, _) in &tables {
            snapshots.push(TableSnapshot::capture(path)?);
        }

        for (written, (path, json)) in tables.iter().enumerate() {
            if let Err(e) = Self::replace_atomically(path, json) {
                Self::roll_back(&tables[..=written], &snapshots);
                return Err(e);
            }
        }

        for snapshot in snapshots.into_iter().flatten() {
            snapshot.discard();
        }

        debug!("Saved league tables");
        Ok(())
    }

    /// Undo the replacements of a partially applied save.
    ///
    /// Tables with a restore point get their previous version back; a table
    /// that did not exist before the save is removed again.
    fn roll_back(written: &[(PathBuf, String)], snapshots: &[Option<TableSnapshot>]) {
        for ((path, _), snapshot) in written.iter().zip(snapshots) {
            match snapshot {
                Some(snapshot) => {
                    if let Err(e) = snapshot.restore() {
                        warn!(error = %e, "Backup restore failed after write error");
                    }
                }
                None => {
                    let _ = fs::remove_file(path);
                }
            }
        }
    }

    fn load_players(&self) -> Result<BTreeMap<PlayerId, PlayerRecord>> {
        let path = self.settings.players_path();

        let mut players = match fs::read_to_string(&path) {
            Ok(contents) => match Self::parse_players(&contents) {
                Ok(players) => players,
                Err(reason) => self.recover_players(&path, &reason)?,
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(table = %path.display(), "No player table found, initializing roster defaults");
                let players = self.initialized_players();
                self.write_table(&path, &players)?;
                players
            }
            Err(e) => {
                return Err(LeagueError::Persistence {
                    message: format!("Failed to read {}: {e}", path.display()),
                }
                .into());
            }
        };

        // Roster entries added since the table was written get default
        // records; existing records are never disturbed.
        for player in self.roster.player_ids() {
            players
                .entry(player)
                .or_insert_with(|| PlayerRecord::with_rating(self.initial_rating));
        }

        Ok(players)
    }

    fn load_pending(&self) -> Vec<Match> {
        let path = self.settings.pending_path();
        let entries: Vec<serde_json::Value> = match Self::read_optional_table(&path) {
            Some(entries) => entries,
            None => return Vec::new(),
        };

        let mut pending = Vec::with_capacity(entries.len());
        for entry in entries {
            match serde_json::from_value::<Match>(entry) {
                Ok(record) => pending.push(record),
                Err(e) => {
                    // Drop the one broken entry, keep the rest of the queue
                    warn!(table = %path.display(), error = %e, "Dropping corrupt pending match");
                }
            }
        }
        pending
    }

    fn load_history(&self) -> Vec<ConfirmedMatch> {
        Self::read_optional_table(&self.settings.history_path()).unwrap_or_default()
    }

    /// Read a whole optional table, treating missing or invalid contents as absent
    fn read_optional_table<T: DeserializeOwned>(path: &Path) -> Option<T> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(table = %path.display(), error = %e, "Failed to read table, substituting empty");
                }
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(table = %path.display(), error = %e, "Invalid table contents, substituting empty");
                None
            }
        }
    }

    /// Parse a players table, applying the same consistency predicate the
    /// store enforces on save so a table it would refuse to write is never
    /// trusted on the way in either.
    fn parse_players(contents: &str) -> std::result::Result<BTreeMap<PlayerId, PlayerRecord>, String> {
        let players: BTreeMap<PlayerId, PlayerRecord> =
            serde_json::from_str(contents).map_err(|e| e.to_string())?;

        if let Some((player, _)) = players
            .iter()
            .find(|(_, record)| !record.is_structurally_valid())
        {
            return Err(format!("inconsistent record for {player}"));
        }

        Ok(players)
    }

    /// Lossy recovery: keep the raw bytes around for forensics, then start
    /// over from roster defaults and persist them immediately.
    fn recover_players(
        &self,
        path: &Path,
        reason: &str,
    ) -> Result<BTreeMap<PlayerId, PlayerRecord>> {
        self.preserve_corrupt_table(path);
        warn!(
            table = %path.display(),
            reason = %reason,
            "Player table failed validation, reinitializing"
        );
        let players = self.initialized_players();
        self.write_table(path, &players)?;
        Ok(players)
    }

    fn initialized_players(&self) -> BTreeMap<PlayerId, PlayerRecord> {
        self.roster
            .player_ids()
            .into_iter()
            .map(|player| (player, PlayerRecord::with_rating(self.initial_rating)))
            .collect()
    }

    fn preserve_corrupt_table(&self, path: &Path) {
        let mut preserved = path.as_os_str().to_os_string();
        preserved.push(".corrupt");
        if let Err(e) = fs::rename(path, PathBuf::from(&preserved)) {
            warn!(table = %path.display(), error = %e, "Failed to preserve corrupt table");
        }
    }

    /// Write a single table with its own restore point (initialization path)
    fn write_table<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = Self::encode(value)?;
        let snapshot = TableSnapshot::capture(path)?;

        match Self::replace_atomically(path, &json) {
            Ok(()) => {
                if let Some(snapshot) = snapshot {
                    snapshot.discard();
                }
                Ok(())
            }
            Err(e) => {
                if let Some(snapshot) = snapshot {
                    if let Err(restore_err) = snapshot.restore() {
                        warn!(error = %restore_err, "Backup restore failed after write error");
                    }
                }
                Err(e)
            }
        }
    }

    fn encode<T: Serialize>(value: &T) -> Result<String> {
        serde_json::to_string_pretty(value).map_err(|e| {
            LeagueError::Persistence {
                message: format!("Failed to serialize table: {e}"),
            }
            .into()
        })
    }

    /// Write to a temporary sibling, then rename into place, so a reader
    /// observes either the old table or the new one and nothing in between.
    fn replace_atomically(path: &Path, json: &str) -> Result<()> {
        let mut tmp = path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|e| LeagueError::Persistence {
            message: format!("Failed to write {}: {e}", tmp.display()),
        })?;

        fs::rename(&tmp, path).map_err(|e| LeagueError::Persistence {
            message: format!("Failed to replace {}: {e}", path.display()),
        })?;

        Ok(())
    }
}
