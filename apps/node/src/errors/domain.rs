//! Domain-level error types used by the controller, scheduler and adapters.
//!
//! These are HTTP-agnostic. Handlers return `Result<T, crate::error::AppError>`
//! and convert through `From<ControlError> for AppError`.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures reading or writing the durable snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read snapshot at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("snapshot at {path} is malformed: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write snapshot at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("snapshot write task did not complete: {0}")]
    Interrupted(#[source] tokio::task::JoinError),
}

/// Failure of a control command.
#[derive(Debug, Error)]
pub enum ControlError {
    /// Unrecognized command string; nothing changed.
    #[error("Invalid command")]
    InvalidCommand(String),
    /// The transition could not be made durable, so it was not applied.
    #[error("state change not applied: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Outcome of a single failed delivery attempt to the partner node.
///
/// Retry policy lives in the scheduler; a link only ever reports one attempt.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("partner did not answer within {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("partner answered with status {0}")]
    Status(u16),
    #[error("unexpected acknowledgement body: {0}")]
    Body(String),
}

impl DeliveryError {
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport(detail.into())
    }
}
