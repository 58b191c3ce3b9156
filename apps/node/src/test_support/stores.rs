use std::io;

use parking_lot::Mutex;

use crate::errors::PersistenceError;
use crate::persistence::{Snapshot, SnapshotStore};

/// In-memory snapshot store that records every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<(Snapshot, Vec<Snapshot>)>,
}

impl MemoryStore {
    pub fn with(snapshot: Snapshot) -> Self {
        Self {
            inner: Mutex::new((snapshot, Vec::new())),
        }
    }

    pub fn current(&self) -> Snapshot {
        self.inner.lock().0
    }

    pub fn saves(&self) -> usize {
        self.inner.lock().1.len()
    }

    /// Every saved snapshot, oldest first.
    pub fn history(&self) -> Vec<Snapshot> {
        self.inner.lock().1.clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Snapshot {
        self.current()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let mut inner = self.inner.lock();
        inner.0 = *snapshot;
        inner.1.push(*snapshot);
        Ok(())
    }
}

/// Store whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingStore {
    initial: Snapshot,
}

impl FailingStore {
    pub fn with(initial: Snapshot) -> Self {
        Self { initial }
    }
}

impl SnapshotStore for FailingStore {
    fn load(&self) -> Snapshot {
        self.initial
    }

    fn save(&self, _snapshot: &Snapshot) -> Result<(), PersistenceError> {
        Err(PersistenceError::Write {
            path: "memory://failing".into(),
            source: io::Error::new(io::ErrorKind::Other, "simulated write failure"),
        })
    }
}
