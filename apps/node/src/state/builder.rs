use std::sync::Arc;

use crate::config::NodeConfig;
use crate::error::AppError;
use crate::game::{GameController, PingScheduler, Role, SchedulerPolicy};
use crate::link::{HttpPartnerLink, PartnerLink};
use crate::node::Node;
use crate::persistence::{FileSnapshotStore, SnapshotStore};
use crate::state::app_state::AppState;

/// Builder for AppState, used by the binary and by tests.
///
/// Pieces not supplied explicitly come from the `NodeConfig`: a file store
/// at `state_file` and an HTTP link to `partner_url`.
pub struct StateBuilder {
    config: Option<NodeConfig>,
    role: Option<Role>,
    store: Option<Arc<dyn SnapshotStore>>,
    link: Option<Arc<dyn PartnerLink>>,
    policy: SchedulerPolicy,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            role: None,
            store: None,
            link: None,
            policy: SchedulerPolicy::default(),
        }
    }

    pub fn with_config(mut self, config: NodeConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_store(mut self, store: Arc<dyn SnapshotStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_link(mut self, link: Arc<dyn PartnerLink>) -> Self {
        self.link = Some(link);
        self
    }

    pub fn with_policy(mut self, policy: SchedulerPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let role = self
            .role
            .or_else(|| self.config.as_ref().map(|c| c.role))
            .ok_or_else(|| AppError::config("node role not configured"))?;

        let store = match (self.store, &self.config) {
            (Some(store), _) => store,
            (None, Some(config)) => Arc::new(FileSnapshotStore::new(&config.state_file)),
            (None, None) => return Err(AppError::config("snapshot store not configured")),
        };

        let link = match (self.link, &self.config) {
            (Some(link), _) => link,
            (None, Some(config)) => Arc::new(HttpPartnerLink::new(
                &config.partner_url,
                config.ping_timeout,
            )?),
            (None, None) => return Err(AppError::config("partner link not configured")),
        };

        let controller = Arc::new(GameController::load(store));
        let scheduler = Arc::new(PingScheduler::new(
            role,
            controller.clone(),
            link,
            self.policy,
        ));

        Ok(AppState::new(Node::new(role, controller, scheduler)))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
