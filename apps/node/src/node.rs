//! One heartbeat node: controller, scheduler and role wired together.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

use crate::errors::ControlError;
use crate::game::scheduler::Pong;
use crate::game::{
    Command, CommandOutcome, GameController, GameState, PingOutcome, PingScheduler, Role,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeStatus {
    pub role: Role,
    pub state: GameState,
    pub pong_time_ms: u64,
}

pub struct Node {
    role: Role,
    controller: Arc<GameController>,
    scheduler: Arc<PingScheduler>,
}

impl Node {
    pub fn new(role: Role, controller: Arc<GameController>, scheduler: Arc<PingScheduler>) -> Self {
        Self {
            role,
            controller,
            scheduler,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Apply a control command.
    ///
    /// An initiator entering `Running` kicks off the first ping in the
    /// background; the returned handle is only useful to tests.
    pub async fn control(
        &self,
        command: Command,
    ) -> Result<(CommandOutcome, Option<JoinHandle<PingOutcome>>), ControlError> {
        let outcome = self.controller.apply_command(command).await?;

        let kickoff = if outcome.entered_running && self.role.is_initiator() {
            info!(command = command.name(), "Initiator sending first ping");
            Some(self.scheduler.spawn_initial_ping())
        } else {
            None
        };

        Ok((outcome, kickoff))
    }

    /// Pick the heartbeat back up after a restart.
    ///
    /// A snapshot restored as `Running` has no ping task behind it. The
    /// initiator restarts the exchange the same way `start` does; a
    /// responder waits for its partner.
    pub async fn resume_heartbeat(&self) -> Option<JoinHandle<PingOutcome>> {
        let state = self.controller.state().await;
        if state == GameState::Running && self.role.is_initiator() {
            info!("Restored as running, initiator sending first ping");
            Some(self.scheduler.spawn_initial_ping())
        } else {
            None
        }
    }

    pub async fn ping(&self) -> (Pong, Option<JoinHandle<PingOutcome>>) {
        self.scheduler.on_ping_received().await
    }

    pub async fn status(&self) -> NodeStatus {
        let snapshot = self.controller.snapshot().await;
        NodeStatus {
            role: self.role,
            state: snapshot.state,
            pong_time_ms: snapshot.pong_time_ms,
        }
    }
}
