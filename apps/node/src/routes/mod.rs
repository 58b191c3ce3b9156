use actix_web::web;

pub mod control;
pub mod health;
pub mod ping;

/// Register every node endpoint.
///
/// `main.rs` wraps these in the logging middleware; tests mount them bare.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(control::configure_routes)
        .configure(ping::configure_routes)
        .configure(health::configure_routes);
}
