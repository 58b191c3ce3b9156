//! Test doubles and harness builders shared by unit and integration tests.

pub mod app_builder;
pub mod links;
pub mod logging;
pub mod stores;

pub use app_builder::{create_test_app, test_node};
pub use links::ScriptedLink;
pub use stores::{FailingStore, MemoryStore};
