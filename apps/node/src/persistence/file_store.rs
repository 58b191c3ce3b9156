//! JSON file snapshot store with write-temp-then-rename saves.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::{Snapshot, SnapshotStore};
use crate::errors::PersistenceError;

#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn try_load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| PersistenceError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    fn write_err(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => {
                info!(
                    path = %self.path.display(),
                    state = %snapshot.state,
                    pong_time_ms = snapshot.pong_time_ms,
                    "Restored snapshot"
                );
                snapshot
            }
            Ok(None) => {
                info!(path = %self.path.display(), "No snapshot found, starting from defaults");
                Snapshot::default()
            }
            Err(e) => {
                warn!(error = %e, "Snapshot unreadable, falling back to defaults");
                Snapshot::default()
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let encoded = serde_json::to_vec_pretty(snapshot).map_err(PersistenceError::Encode)?;

        // The temp file must live on the same filesystem for the rename to be atomic.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.write_err(e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.write_err(e))?;
        tmp.write_all(&encoded).map_err(|e| self.write_err(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.write_err(e.error))?;

        debug!(
            path = %self.path.display(),
            state = %snapshot.state,
            pong_time_ms = snapshot.pong_time_ms,
            "Snapshot saved"
        );
        Ok(())
    }
}
