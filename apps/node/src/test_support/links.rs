use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::errors::DeliveryError;
use crate::link::PartnerLink;

/// Partner link that answers from a script and records every attempt.
///
/// Scripted outcomes are consumed first; once empty, `fallback` applies.
#[derive(Debug)]
pub struct ScriptedLink {
    script: Mutex<VecDeque<bool>>,
    fallback: bool,
    attempts: Mutex<Vec<Instant>>,
}

impl ScriptedLink {
    pub fn new(script: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn always_ok() -> Self {
        Self::new([], true)
    }

    pub fn always_failing() -> Self {
        Self::new([], false)
    }

    pub fn failing_then_ok(failures: usize) -> Self {
        Self::new(std::iter::repeat(false).take(failures), true)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.lock().len() as u32
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.attempts.lock().clone()
    }
}

#[async_trait]
impl PartnerLink for ScriptedLink {
    async fn deliver_ping(&self) -> Result<(), DeliveryError> {
        self.attempts.lock().push(Instant::now());
        let ok = self.script.lock().pop_front().unwrap_or(self.fallback);
        if ok {
            Ok(())
        } else {
            Err(DeliveryError::transport("scripted failure"))
        }
    }
}
