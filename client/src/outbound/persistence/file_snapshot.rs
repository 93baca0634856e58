//! JSON snapshot of the store kept in one file.
//!
//! Writes go to a uniquely named staging file that then replaces the
//! snapshot, so a crash mid-write never leaves a truncated snapshot behind.

use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{StatePersistence, StatePersistenceError};
use crate::store::State;

/// File name of the snapshot inside the state directory.
pub const STORAGE_KEY: &str = "kanban-state.json";

/// Persistence adapter storing the snapshot under a directory.
#[derive(Debug, Clone)]
pub struct FileStatePersistence {
    dir: PathBuf,
}

impl FileStatePersistence {
    /// Store snapshots in `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Full path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.join(STORAGE_KEY)
    }

    fn io_error(&self, path: &Path, error: &io::Error) -> StatePersistenceError {
        StatePersistenceError::io(format!("{}: {error}", self.dir.join(path).display()))
    }
}

impl StatePersistence for FileStatePersistence {
    fn load(&self) -> Result<Option<State>, StatePersistenceError> {
        let dir = match Dir::open_ambient_dir(&self.dir, ambient_authority()) {
            Ok(dir) => dir,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(Path::new(""), &error)),
        };
        let raw = match dir.read_to_string(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(self.io_error(Path::new(STORAGE_KEY), &error)),
        };

        let state = serde_json::from_str(&raw)
            .map_err(|error| StatePersistenceError::decode(error.to_string()))?;
        debug!(path = %self.snapshot_path().display(), "loaded state snapshot");
        Ok(Some(state))
    }

    fn save(&self, state: &State) -> Result<(), StatePersistenceError> {
        let encoded = serde_json::to_vec_pretty(state)
            .map_err(|error| StatePersistenceError::encode(error.to_string()))?;

        Dir::create_ambient_dir_all(&self.dir, ambient_authority())
            .map_err(|error| self.io_error(Path::new(""), &error))?;
        let dir = Dir::open_ambient_dir(&self.dir, ambient_authority())
            .map_err(|error| self.io_error(Path::new(""), &error))?;

        let staging = format!(".{STORAGE_KEY}.{}.tmp", Uuid::new_v4().simple());
        dir.write(&staging, &encoded)
            .map_err(|error| self.io_error(Path::new(&staging), &error))?;
        if let Err(error) = dir.rename(&staging, &dir, STORAGE_KEY) {
            let _cleanup_result = dir.remove_file(&staging);
            return Err(self.io_error(Path::new(STORAGE_KEY), &error));
        }
        Ok(())
    }
}
