use actix_web::{web, App, HttpServer};
use pong_node::config::NodeConfig;
use pong_node::middleware::{RequestTrace, StructuredLogger};
use pong_node::routes;
use pong_node::state::build_state;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Port, role and partner URL are resolved by the deployment and passed in
    // through the environment (see NodeConfig for the variable names).
    let config = match NodeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid node configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_config(config.clone()).build() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build node state");
            std::process::exit(1);
        }
    };

    let status = app_state.node.status().await;
    info!(
        host = %config.host,
        port = config.port,
        role = %config.role,
        partner_url = %config.partner_url,
        state_file = %config.state_file.display(),
        state = %status.state,
        pong_time_ms = status.pong_time_ms,
        "Starting pong node"
    );

    app_state.node.resume_heartbeat().await;

    let role = config.role;
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .wrap(StructuredLogger::new(role))
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
