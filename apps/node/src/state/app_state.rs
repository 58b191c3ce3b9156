use std::sync::Arc;

use crate::game::Role;
use crate::node::Node;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub node: Arc<Node>,
}

impl AppState {
    pub fn new(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    pub fn role(&self) -> Role {
        self.node.role()
    }
}
