use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::PartnerLink;
use crate::error::AppError;
use crate::errors::DeliveryError;

pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Deserialize)]
struct PongBody {
    message: String,
}

/// `GET {partner}/ping` over a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpPartnerLink {
    client: reqwest::Client,
    ping_url: String,
    timeout: Duration,
}

impl HttpPartnerLink {
    pub fn new(partner_base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            ping_url: format!("{}/ping", partner_base_url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn ping_url(&self) -> &str {
        &self.ping_url
    }

    fn classify(&self, err: reqwest::Error) -> DeliveryError {
        if err.is_timeout() {
            DeliveryError::Timeout(self.timeout)
        } else {
            DeliveryError::transport(err.to_string())
        }
    }
}

#[async_trait]
impl PartnerLink for HttpPartnerLink {
    async fn deliver_ping(&self) -> Result<(), DeliveryError> {
        let response = self
            .client
            .get(&self.ping_url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status(status.as_u16()));
        }

        let body: PongBody = response.json().await.map_err(|e| {
            if e.is_timeout() {
                DeliveryError::Timeout(self.timeout)
            } else {
                DeliveryError::Body(e.to_string())
            }
        })?;
        if body.message != "pong" {
            return Err(DeliveryError::Body(body.message));
        }

        debug!(url = %self.ping_url, "Partner acknowledged ping");
        Ok(())
    }
}
