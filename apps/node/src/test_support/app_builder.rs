//! Node and Actix test-service builders.

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{web, App, Error as ActixError};

use crate::game::{GameController, PingScheduler, Role, SchedulerPolicy};
use crate::link::PartnerLink;
use crate::middleware::{RequestTrace, StructuredLogger};
use crate::node::Node;
use crate::persistence::SnapshotStore;
use crate::state::AppState;

/// Wire a node from explicit parts, bypassing configuration.
pub fn test_node(
    role: Role,
    store: Arc<dyn SnapshotStore>,
    link: Arc<dyn PartnerLink>,
    policy: SchedulerPolicy,
) -> Node {
    let controller = Arc::new(GameController::load(store));
    let scheduler = Arc::new(PingScheduler::new(
        role,
        controller.clone(),
        link,
        policy,
    ));
    Node::new(role, controller, scheduler)
}

/// Build an initialized Actix test service with production routes and middleware.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError> {
    let role = state.role();
    let app = App::new()
        .wrap(RequestTrace)
        .wrap(StructuredLogger::new(role))
        .app_data(web::Data::new(state))
        .configure(crate::routes::configure);

    actix_web::test::init_service(app).await
}
