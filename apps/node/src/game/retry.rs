//! Bounded retry with a fixed backoff between attempts.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::errors::DeliveryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryResult {
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Run `attempt` until it succeeds or `max_attempts` is reached.
    ///
    /// The backoff is slept between attempts only, never after the last one.
    pub async fn run<F, Fut>(&self, label: &'static str, mut attempt: F) -> RetryResult
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), DeliveryError>>,
    {
        let mut attempts = 0u32;
        while attempts < self.max_attempts {
            attempts += 1;
            match attempt().await {
                Ok(()) => return RetryResult::Succeeded { attempts },
                Err(err) => {
                    warn!(
                        error = %err,
                        attempt = attempts,
                        max_attempts = self.max_attempts,
                        label,
                        "Ping delivery failed"
                    );
                    if attempts < self.max_attempts {
                        sleep(self.backoff).await;
                    }
                }
            }
        }
        RetryResult::Exhausted { attempts }
    }
}
