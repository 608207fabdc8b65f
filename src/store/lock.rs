//! Cross-process advisory lock guarding the store
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on
//! Windows). Acquisition is try-once: contention fails immediately with
//! `LeagueError::Concurrency` and the caller decides whether to retry the
//! whole operation. The lock releases on drop, on every exit path.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{LeagueError, Result};

/// Exclusive advisory lock over the store's load-modify-save cycle
#[derive(Debug)]
pub struct StoreLock {
    // Kept open to maintain the lock
    file: File,
    path: PathBuf,
}

impl StoreLock {
    /// Try to acquire the lock without blocking.
    ///
    /// Fails with `LeagueError::Concurrency` if another session holds it.
    pub fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .map_err(|e| LeagueError::Persistence {
                message: format!("Failed to open lock file {}: {e}", path.display()),
            })?;

        file.try_lock_exclusive()
            .map_err(|_| LeagueError::Concurrency {
                path: path.to_path_buf(),
            })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // The lock file itself stays behind: removing it would let two
        // sessions lock different inodes for the same path.
        let _ = FileExt::unlock(&self.file);
    }
}
