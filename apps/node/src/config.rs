//! Node configuration loaded from environment variables.
//!
//! Port and partner discovery is the deployment's job; the node only needs
//! its listen address, an already-resolved partner base URL and its role.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;
use crate::game::Role;
use crate::link::http::DEFAULT_PING_TIMEOUT;

#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    pub partner_url: String,
    pub role: Role,
    pub state_file: PathBuf,
    pub ping_timeout: Duration,
}

impl NodeConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("NODE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("NODE_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("NODE_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => 8000,
        };

        let partner_url = lookup("PARTNER_URL")
            .unwrap_or_else(|| "http://localhost:8001".to_string())
            .trim_end_matches('/')
            .to_string();
        if !(partner_url.starts_with("http://") || partner_url.starts_with("https://")) {
            return Err(AppError::config(format!(
                "PARTNER_URL must be an http(s) URL, got '{partner_url}'"
            )));
        }

        let role = match lookup("INSTANCE_ROLE") {
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|e| AppError::config(format!("INSTANCE_ROLE: {e}")))?,
            None => Role::Initiator,
        };

        let state_file = lookup("STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("pong_state.json"));

        let ping_timeout = match lookup("PING_TIMEOUT_MS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(AppError::config(format!(
                        "PING_TIMEOUT_MS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_PING_TIMEOUT,
        };

        Ok(Self {
            host,
            port,
            partner_url,
            role,
            state_file,
            ping_timeout,
        })
    }
}
