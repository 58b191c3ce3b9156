//! Durable `{state, pong_time_ms}` snapshot.

pub mod file_store;

use serde::{Deserialize, Serialize};

use crate::errors::PersistenceError;
use crate::game::{GameState, DEFAULT_PONG_TIME_MS};

pub use file_store::FileSnapshotStore;

/// The record that survives restarts. Field names match the on-disk JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: GameState,
    pub pong_time_ms: u64,
}

impl Snapshot {
    pub fn new(state: GameState, pong_time_ms: u64) -> Self {
        Self {
            state,
            pong_time_ms,
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(GameState::Stopped, DEFAULT_PONG_TIME_MS)
    }
}

/// Storage for the node snapshot.
///
/// `load` never fails: unreadable data falls back to `Snapshot::default()`.
/// `save` must replace the record atomically from a reader's point of view.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Snapshot;

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_stopped_at_one_second() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.state, GameState::Stopped);
        assert_eq!(snapshot.pong_time_ms, 1000);
    }

    #[test]
    fn snapshot_matches_file_layout() {
        let json = serde_json::to_value(Snapshot::new(GameState::Running, 250)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "state": "running", "pong_time_ms": 250 })
        );
    }
}
