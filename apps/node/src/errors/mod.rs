//! Error handling for the pong node.

pub mod domain;

pub use domain::{ControlError, DeliveryError, PersistenceError};
