use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct PongResponse {
    pub message: String,
}

/// Reply at once; the next outbound ping (if any) is scheduled in the background.
async fn ping(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (_pong, _next) = app_state.node.ping().await;
    Ok(HttpResponse::Ok().json(PongResponse {
        message: "pong".to_string(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(ping));
}
