//! Heartbeat game: per-node state, role and control commands.

pub mod controller;
pub mod retry;
pub mod scheduler;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ControlError;

pub use controller::GameController;
pub use retry::RetryPolicy;
pub use scheduler::{PingOutcome, PingScheduler, SchedulerPolicy};

/// Default delay between a received ping and the next outbound one.
pub const DEFAULT_PONG_TIME_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl GameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameState::Stopped => "stopped",
            GameState::Running => "running",
            GameState::Paused => "paused",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed at startup. Only the initiator emits the first ping of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Initiator,
    Responder,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Initiator => "initiator",
            Role::Responder => "responder",
        }
    }

    pub fn is_initiator(&self) -> bool {
        matches!(self, Role::Initiator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "initiator" => Ok(Role::Initiator),
            "responder" => Ok(Role::Responder),
            other => Err(format!(
                "unknown role '{other}', expected 'initiator' or 'responder'"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `interval_ms: None` keeps the current interval.
    Start { interval_ms: Option<u64> },
    Pause,
    Resume,
    Stop,
}

impl Command {
    /// Parse a control command as received on the wire.
    ///
    /// The interval is only meaningful for `start` and is dropped otherwise.
    pub fn parse(command: &str, pong_time_ms: Option<u64>) -> Result<Self, ControlError> {
        match command {
            "start" => Ok(Command::Start {
                interval_ms: pong_time_ms,
            }),
            "pause" => Ok(Command::Pause),
            "resume" => Ok(Command::Resume),
            "stop" => Ok(Command::Stop),
            other => Err(ControlError::InvalidCommand(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Start { .. } => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Stop => "stop",
        }
    }
}

/// Result of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    pub state: GameState,
    /// True when this command moved the node into `Running`.
    pub entered_running: bool,
}
