use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ControlError;

/// Error body returned by every failing endpoint.
///
/// `error` carries the human-readable message the control CLI prints;
/// `code` is a stable SCREAMING_SNAKE_CASE identifier.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid command")]
    InvalidCommand,
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Persistence error: {detail}")]
    Persistence { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCommand => "INVALID_COMMAND",
            AppError::BadRequest { .. } => "BAD_REQUEST",
            AppError::Persistence { .. } => "PERSISTENCE_WRITE_FAILED",
            AppError::Config { .. } => "CONFIG_ERROR",
        }
    }

    fn detail(&self) -> String {
        match self {
            AppError::InvalidCommand => "Invalid command".to_string(),
            AppError::BadRequest { detail } => detail.clone(),
            AppError::Persistence { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCommand => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<ControlError> for AppError {
    fn from(err: ControlError) -> Self {
        match err {
            ControlError::InvalidCommand(_) => AppError::InvalidCommand,
            ControlError::Persistence(e) => AppError::Persistence {
                detail: e.to_string(),
            },
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorBody {
            error: self.detail(),
            code: self.code(),
        })
    }
}
