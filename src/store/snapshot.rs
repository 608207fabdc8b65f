//! Versioned restore points for table files
//!
//! Before a table is overwritten, the previous version is copied to a
//! backup sibling. A failed write restores the backup; a successful write
//! discards it. A table that does not exist yet needs no snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{LeagueError, Result};

/// Restore point for a single table file
#[derive(Debug)]
pub struct TableSnapshot {
    original: PathBuf,
    backup: PathBuf,
}

impl TableSnapshot {
    /// Snapshot the current version of `path`, if one exists
    pub fn capture(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let backup = Self::backup_path(path);
        fs::copy(path, &backup).map_err(|e| LeagueError::Persistence {
            message: format!("Failed to back up {}: {e}", path.display()),
        })?;

        Ok(Some(Self {
            original: path.to_path_buf(),
            backup,
        }))
    }

    /// Put the snapshotted version back in place
    pub fn restore(&self) -> Result<()> {
        fs::copy(&self.backup, &self.original).map_err(|e| LeagueError::Persistence {
            message: format!(
                "Failed to restore {} from backup: {e}",
                self.original.display()
            ),
        })?;
        warn!(table = %self.original.display(), "Restored table from backup after failed write");
        Ok(())
    }

    /// Drop the restore point after a successful write
    pub fn discard(self) {
        let _ = fs::remove_file(&self.backup);
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut os_string = path.as_os_str().to_os_string();
        os_string.push(".bak");
        PathBuf::from(os_string)
    }
}
