//! Custom error types for the common library
//!
//! This module defines the errors raised while talking to the chat platform
//! and while loading its configuration.

use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Custom error type for platform operations
#[derive(Error, Debug)]
pub enum DiscordError {
    /// Error occurred while sending the request or reading the response
    #[error("Platform transport error: {0}")]
    Http(#[from] ReqwestError),

    /// The platform answered with a non-success status
    #[error("Platform API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Configuration error
    #[error("Platform configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DiscordError
pub type DiscordResult<T> = Result<T, DiscordError>;
