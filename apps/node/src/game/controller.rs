//! Single owner of this node's game state and ping interval.
//!
//! All mutations, including the scheduler's forced stop, go through one
//! `tokio::sync::Mutex`. The lock is fair, so queued commands apply in
//! arrival order, and it is held across the snapshot write so a
//! read-modify-persist sequence never interleaves with another.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task;
use tracing::{error, info, warn};

use super::{Command, CommandOutcome, GameState};
use crate::errors::{ControlError, PersistenceError};
use crate::persistence::{Snapshot, SnapshotStore};

pub struct GameController {
    current: Mutex<Snapshot>,
    store: Arc<dyn SnapshotStore>,
}

impl GameController {
    /// Restore from the store, falling back to defaults.
    pub fn load(store: Arc<dyn SnapshotStore>) -> Self {
        let snapshot = store.load();
        Self {
            current: Mutex::new(snapshot),
            store,
        }
    }

    pub async fn state(&self) -> GameState {
        self.current.lock().await.state
    }

    pub async fn pong_time_ms(&self) -> u64 {
        self.current.lock().await.pong_time_ms
    }

    pub async fn snapshot(&self) -> Snapshot {
        *self.current.lock().await
    }

    pub async fn apply_command(&self, command: Command) -> Result<CommandOutcome, ControlError> {
        let mut current = self.current.lock().await;
        let before = *current;

        let next = match command {
            Command::Start { interval_ms } => Some(Snapshot::new(
                GameState::Running,
                interval_ms.unwrap_or(before.pong_time_ms),
            )),
            Command::Pause if before.state == GameState::Running => {
                Some(Snapshot::new(GameState::Paused, before.pong_time_ms))
            }
            Command::Resume if before.state == GameState::Paused => {
                Some(Snapshot::new(GameState::Running, before.pong_time_ms))
            }
            Command::Stop => Some(Snapshot::new(GameState::Stopped, before.pong_time_ms)),
            Command::Pause | Command::Resume => None,
        };

        let Some(next) = next else {
            info!(
                command = command.name(),
                state = %before.state,
                "Command ignored in current state"
            );
            return Ok(CommandOutcome {
                state: before.state,
                entered_running: false,
            });
        };

        // Persist before committing so memory never runs ahead of disk.
        self.persist(next).await.map_err(|e| {
            error!(command = command.name(), error = %e, "Failed to persist state change");
            ControlError::from(e)
        })?;
        *current = next;

        info!(
            command = command.name(),
            from = %before.state,
            to = %next.state,
            pong_time_ms = next.pong_time_ms,
            "Command applied"
        );

        Ok(CommandOutcome {
            state: next.state,
            entered_running: next.state == GameState::Running,
        })
    }

    /// Internal `Running -> Stopped` edge taken when the partner link is lost.
    ///
    /// Returns true if the node was stopped by this call. A node that already
    /// left `Running` is left alone.
    pub async fn force_stop(&self, reason: &str) -> bool {
        let mut current = self.current.lock().await;
        if current.state != GameState::Running {
            info!(
                state = %current.state,
                reason,
                "Forced stop skipped, node no longer running"
            );
            return false;
        }

        let next = Snapshot::new(GameState::Stopped, current.pong_time_ms);
        if let Err(e) = self.persist(next).await {
            // The heartbeat must not continue over a dead link, so memory wins here.
            error!(error = %e, reason, "Failed to persist forced stop");
        }
        *current = next;

        warn!(reason, "Node forced to stopped");
        true
    }

    /// Write the snapshot on the blocking pool. Callers hold the state lock
    /// across the await, so writes still land in command order.
    async fn persist(&self, snapshot: Snapshot) -> Result<(), PersistenceError> {
        let store = self.store.clone();
        task::spawn_blocking(move || store.save(&snapshot))
            .await
            .unwrap_or_else(|e| Err(PersistenceError::Interrupted(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingStore, MemoryStore};

    fn controller_with(store: &Arc<MemoryStore>) -> GameController {
        GameController::load(store.clone())
    }

    #[tokio::test]
    async fn loads_persisted_snapshot() {
        let store = Arc::new(MemoryStore::with(Snapshot::new(GameState::Paused, 300)));
        let controller = controller_with(&store);

        assert_eq!(controller.state().await, GameState::Paused);
        assert_eq!(controller.pong_time_ms().await, 300);
    }

    #[tokio::test]
    async fn start_sets_interval_and_persists() {
        let store = Arc::new(MemoryStore::default());
        let controller = controller_with(&store);

        let outcome = controller
            .apply_command(Command::Start {
                interval_ms: Some(50),
            })
            .await
            .unwrap();

        assert_eq!(outcome.state, GameState::Running);
        assert!(outcome.entered_running);
        assert_eq!(store.current(), Snapshot::new(GameState::Running, 50));
    }

    #[tokio::test]
    async fn start_without_interval_keeps_current_one() {
        let store = Arc::new(MemoryStore::with(Snapshot::new(GameState::Stopped, 700)));
        let controller = controller_with(&store);

        controller
            .apply_command(Command::Start { interval_ms: None })
            .await
            .unwrap();

        assert_eq!(store.current(), Snapshot::new(GameState::Running, 700));
    }

    #[tokio::test]
    async fn start_while_running_restarts_the_cycle() {
        let store = Arc::new(MemoryStore::with(Snapshot::new(GameState::Running, 100)));
        let controller = controller_with(&store);

        let outcome = controller
            .apply_command(Command::Start {
                interval_ms: Some(20),
            })
            .await
            .unwrap();

        assert!(outcome.entered_running);
        assert_eq!(controller.pong_time_ms().await, 20);
    }

    #[tokio::test]
    async fn pause_and_resume_only_act_in_matching_state() {
        let store = Arc::new(MemoryStore::default());
        let controller = controller_with(&store);

        let paused = controller.apply_command(Command::Pause).await.unwrap();
        assert_eq!(paused.state, GameState::Stopped);
        let resumed = controller.apply_command(Command::Resume).await.unwrap();
        assert_eq!(resumed.state, GameState::Stopped);
        assert!(!resumed.entered_running);
        assert_eq!(store.saves(), 0, "no-ops must not write the snapshot");

        controller
            .apply_command(Command::Start { interval_ms: None })
            .await
            .unwrap();
        let paused = controller.apply_command(Command::Pause).await.unwrap();
        assert_eq!(paused.state, GameState::Paused);

        let again = controller.apply_command(Command::Pause).await.unwrap();
        assert_eq!(again.state, GameState::Paused);

        let resumed = controller.apply_command(Command::Resume).await.unwrap();
        assert_eq!(resumed.state, GameState::Running);
        assert!(resumed.entered_running);

        let resumed_again = controller.apply_command(Command::Resume).await.unwrap();
        assert_eq!(resumed_again.state, GameState::Running);
        assert!(!resumed_again.entered_running);
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let store = Arc::new(MemoryStore::with(Snapshot::new(GameState::Paused, 10)));
        let controller = controller_with(&store);

        for _ in 0..2 {
            let outcome = controller.apply_command(Command::Stop).await.unwrap();
            assert_eq!(outcome.state, GameState::Stopped);
        }
        assert_eq!(store.current(), Snapshot::new(GameState::Stopped, 10));
    }

    #[tokio::test]
    async fn failed_write_leaves_state_untouched() {
        let controller = GameController::load(Arc::new(FailingStore::default()));

        let err = controller
            .apply_command(Command::Start {
                interval_ms: Some(5),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ControlError::Persistence(_)));
        assert_eq!(controller.state().await, GameState::Stopped);
        assert_eq!(controller.pong_time_ms().await, 1000);
    }

    #[tokio::test]
    async fn force_stop_only_leaves_running() {
        let store = Arc::new(MemoryStore::with(Snapshot::new(GameState::Paused, 10)));
        let controller = controller_with(&store);

        assert!(!controller.force_stop("test").await);
        assert_eq!(controller.state().await, GameState::Paused);

        controller.apply_command(Command::Resume).await.unwrap();
        assert!(controller.force_stop("test").await);
        assert_eq!(store.current(), Snapshot::new(GameState::Stopped, 10));
    }

    #[tokio::test]
    async fn force_stop_wins_over_failed_write() {
        let controller = GameController::load(Arc::new(FailingStore::with(Snapshot::new(
            GameState::Running,
            10,
        ))));

        assert!(controller.force_stop("link lost").await);
        assert_eq!(controller.state().await, GameState::Stopped);
    }

    #[tokio::test]
    async fn concurrent_commands_apply_in_arrival_order() {
        let store = Arc::new(MemoryStore::default());
        let controller = controller_with(&store);

        let (start, pause, stop) = tokio::join!(
            controller.apply_command(Command::Start {
                interval_ms: Some(40),
            }),
            controller.apply_command(Command::Pause),
            controller.apply_command(Command::Stop),
        );

        assert_eq!(start.unwrap().state, GameState::Running);
        assert_eq!(pause.unwrap().state, GameState::Paused);
        assert_eq!(stop.unwrap().state, GameState::Stopped);
        assert_eq!(
            store.history(),
            vec![
                Snapshot::new(GameState::Running, 40),
                Snapshot::new(GameState::Paused, 40),
                Snapshot::new(GameState::Stopped, 40),
            ]
        );
    }

    #[tokio::test]
    async fn force_stop_queues_behind_pending_commands() {
        let store = Arc::new(MemoryStore::default());
        let controller = controller_with(&store);

        let (start, stopped, pause) = tokio::join!(
            controller.apply_command(Command::Start { interval_ms: None }),
            controller.force_stop("link lost"),
            controller.apply_command(Command::Pause),
        );

        assert!(start.unwrap().entered_running);
        assert!(stopped);
        assert_eq!(pause.unwrap().state, GameState::Stopped);
        assert_eq!(
            store.history(),
            vec![
                Snapshot::new(GameState::Running, 1000),
                Snapshot::new(GameState::Stopped, 1000),
            ]
        );
    }

    /// Records which thread each write ran on.
    struct ThreadRecordingStore {
        threads: parking_lot::Mutex<Vec<std::thread::ThreadId>>,
    }

    impl SnapshotStore for ThreadRecordingStore {
        fn load(&self) -> Snapshot {
            Snapshot::default()
        }

        fn save(&self, _snapshot: &Snapshot) -> Result<(), PersistenceError> {
            self.threads.lock().push(std::thread::current().id());
            Ok(())
        }
    }

    #[tokio::test]
    async fn snapshot_writes_run_off_the_runtime_thread() {
        let store = Arc::new(ThreadRecordingStore {
            threads: parking_lot::Mutex::new(Vec::new()),
        });
        let controller = GameController::load(store.clone());

        controller
            .apply_command(Command::Start { interval_ms: None })
            .await
            .unwrap();
        assert!(controller.force_stop("link lost").await);

        let runtime_thread = std::thread::current().id();
        let threads = store.threads.lock().clone();
        assert_eq!(threads.len(), 2);
        assert!(threads.iter().all(|id| *id != runtime_thread));
    }
}
