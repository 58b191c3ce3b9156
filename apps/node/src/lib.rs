#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod game;
pub mod link;
pub mod middleware;
pub mod node;
pub mod persistence;
pub mod routes;
pub mod state;
pub mod test_support;

// Re-exports for public API
pub use config::NodeConfig;
pub use error::AppError;
pub use game::{Command, GameController, GameState, PingOutcome, PingScheduler, Role};
pub use link::{HttpPartnerLink, PartnerLink};
pub use node::{Node, NodeStatus};
pub use persistence::{FileSnapshotStore, Snapshot, SnapshotStore};
pub use state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::logging::init();
}
