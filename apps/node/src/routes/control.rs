use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::game::{Command, GameState, Role};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ControlRequest {
    /// Kept loose so a missing or non-string command is reported as an
    /// invalid command rather than a malformed body.
    #[serde(default)]
    pub command: Option<Value>,
    #[serde(default)]
    pub pong_time_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ControlResponse {
    pub status: String,
    pub state: GameState,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StateResponse {
    pub status: String,
    pub state: GameState,
    pub pong_time_ms: u64,
    pub role: Role,
}

async fn control(
    app_state: web::Data<AppState>,
    body: ValidatedJson<ControlRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let name = request
        .command
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default();
    let command = Command::parse(name, request.pong_time_ms).map_err(|e| {
        info!(command = ?request.command, "Rejected unknown control command");
        AppError::from(e)
    })?;

    // The kickoff ping runs detached; the caller only sees the new state.
    let (outcome, _kickoff) = app_state.node.control(command).await?;

    Ok(HttpResponse::Ok().json(ControlResponse {
        status: "ok".to_string(),
        state: outcome.state,
    }))
}

async fn state(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let status = app_state.node.status().await;
    Ok(HttpResponse::Ok().json(StateResponse {
        status: "ok".to_string(),
        state: status.state,
        pong_time_ms: status.pong_time_ms,
        role: status.role,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/control", web::post().to(control))
        .route("/state", web::get().to(state));
}
