//! Outbound channel to the partner node.

pub mod http;

use async_trait::async_trait;

use crate::errors::DeliveryError;

pub use http::HttpPartnerLink;

/// One delivery attempt of a ping to the partner's inbound endpoint.
///
/// Implementations bound each attempt in time and report its outcome only;
/// retrying is the scheduler's job.
#[async_trait]
pub trait PartnerLink: Send + Sync {
    async fn deliver_ping(&self) -> Result<(), DeliveryError>;
}
