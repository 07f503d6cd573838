//! Custom error types for the interactions service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the interactions service
#[derive(Error, Debug)]
pub enum BotError {
    /// Missing or invalid request signature
    #[error("Bad request signature")]
    InvalidSignature,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Command the service does not handle
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Interaction type the service does not handle
    #[error("Unknown interaction type: {0}")]
    UnknownInteraction(u8),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let status = match self {
            BotError::InvalidSignature => StatusCode::UNAUTHORIZED,
            BotError::BadRequest(_)
            | BotError::UnknownCommand(_)
            | BotError::UnknownInteraction(_) => StatusCode::BAD_REQUEST,
            BotError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for service results
pub type BotResult<T> = Result<T, BotError>;
