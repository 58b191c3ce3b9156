//! Timed emission of outbound pings.
//!
//! Scheduled tasks are not cancelled by `pause` or `stop`. A sleeping task
//! re-reads the state when it wakes and does nothing unless the node is still
//! `Running`. A task that already passed that check finishes its retry loop
//! after a stop, and one sleeping across a stop/start pair fires into the new
//! run: a ping can land up to one interval (plus backoff) late.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use super::retry::{RetryPolicy, RetryResult};
use super::{GameController, GameState, Role};
use crate::link::PartnerLink;

/// Timing and retry bounds for both ping paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerPolicy {
    /// Wait before the first ping so the partner's own transition lands first.
    pub settle_delay: Duration,
    /// Bounds for the first ping of a run; exhaustion is silent.
    pub initial: RetryPolicy,
    /// Bounds for every later ping; exhaustion stops the node.
    pub steady: RetryPolicy,
}

impl Default for SchedulerPolicy {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            initial: RetryPolicy::new(5, Duration::from_secs(1)),
            steady: RetryPolicy::new(3, Duration::from_secs(1)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingOutcome {
    Delivered { attempts: u32 },
    /// The node was not running at wake time; the link was not touched.
    Skipped,
    /// Initial ping gave up; state unchanged.
    GaveUp { attempts: u32 },
    /// Steady-state ping gave up; the node is stopped if it was still running.
    LinkLost { attempts: u32 },
}

/// Pong acknowledgement returned to the partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pong;

pub struct PingScheduler {
    role: Role,
    controller: Arc<GameController>,
    link: Arc<dyn PartnerLink>,
    policy: SchedulerPolicy,
}

impl PingScheduler {
    pub fn new(
        role: Role,
        controller: Arc<GameController>,
        link: Arc<dyn PartnerLink>,
        policy: SchedulerPolicy,
    ) -> Self {
        Self {
            role,
            controller,
            link,
            policy,
        }
    }

    /// First ping of a run or resume cycle.
    ///
    /// Unlike `schedule_next_ping`, running out of attempts here leaves the
    /// state alone. This asymmetry is kept on purpose but is probably an
    /// oversight: a dead partner at start time leaves this node `Running`
    /// with no heartbeat until the partner pings back.
    pub async fn send_initial_ping(&self) -> PingOutcome {
        sleep(self.policy.settle_delay).await;

        let link = &self.link;
        match self
            .policy
            .initial
            .run("initial", move || link.deliver_ping())
            .await
        {
            RetryResult::Succeeded { attempts } => {
                info!(role = %self.role, attempts, "Initial ping delivered");
                PingOutcome::Delivered { attempts }
            }
            RetryResult::Exhausted { attempts } => {
                warn!(
                    role = %self.role,
                    attempts,
                    "Initial ping gave up; state left unchanged"
                );
                PingOutcome::GaveUp { attempts }
            }
        }
    }

    /// Wait one interval, then ping the partner if still running.
    pub async fn schedule_next_ping(&self) -> PingOutcome {
        let interval = Duration::from_millis(self.controller.pong_time_ms().await);
        sleep(interval).await;

        let state = self.controller.state().await;
        if state != GameState::Running {
            debug!(role = %self.role, state = %state, "Scheduled ping skipped");
            return PingOutcome::Skipped;
        }

        let link = &self.link;
        match self
            .policy
            .steady
            .run("steady", move || link.deliver_ping())
            .await
        {
            RetryResult::Succeeded { attempts } => {
                debug!(role = %self.role, attempts, "Ping delivered");
                PingOutcome::Delivered { attempts }
            }
            RetryResult::Exhausted { attempts } => {
                error!(
                    role = %self.role,
                    attempts,
                    "Retries exhausted, partner link lost"
                );
                self.controller.force_stop("ping retries exhausted").await;
                PingOutcome::LinkLost { attempts }
            }
        }
    }

    pub fn spawn_initial_ping(self: &Arc<Self>) -> JoinHandle<PingOutcome> {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move { scheduler.send_initial_ping().await })
    }

    pub fn spawn_next_ping(self: &Arc<Self>) -> JoinHandle<PingOutcome> {
        let scheduler = Arc::clone(self);
        tokio::spawn(async move { scheduler.schedule_next_ping().await })
    }

    /// Inbound ping: acknowledge at once, and keep the ring going if running.
    pub async fn on_ping_received(self: &Arc<Self>) -> (Pong, Option<JoinHandle<PingOutcome>>) {
        let next = if self.controller.state().await == GameState::Running {
            Some(self.spawn_next_ping())
        } else {
            None
        };
        (Pong, next)
    }
}
