//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for ReviewBot
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ReviewBotError {
    /// Request is missing the fields needed to identify a meeting.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The requested strategy exists but is not implemented (live join).
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The calendar/graph provider rejected or failed a call.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Unsupported document type: {0}")]
    UnsupportedDocumentType(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ReviewBotError {
    /// HTTP status code equivalent used by the request surfaces.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) | Self::UnsupportedDocumentType(_) => 400,
            Self::NotImplemented(_) => 501,
            _ => 500,
        }
    }

    /// Detail text without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidRequest(message)
            | Self::NotImplemented(message)
            | Self::NotFound(message)
            | Self::Provider(message)
            | Self::UnsupportedDocumentType(message)
            | Self::Config(message)
            | Self::Network(message)
            | Self::Auth(message)
            | Self::Internal(message) => message,
        }
    }
}

/// Result type alias for ReviewBot operations
pub type Result<T> = std::result::Result<T, ReviewBotError>;
