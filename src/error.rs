//! Error types for the console data layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Api Error Enum ==
/// Errors surfaced by the transport and the resource stores.
///
/// The request cache never produces one of these; whatever the transport
/// returns reaches the caller unchanged.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection, timeout, TLS...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns the HTTP status for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

// == Load Error Enum ==
/// Failure of a preloadable loader.
///
/// Cloneable so one settled failure can be handed to every waiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The loader's factory failed
    #[error("Loader '{name}' failed: {message}")]
    Failed { name: String, message: String },

    /// No loader is registered under this name
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

// == Result Type Alias ==
/// Convenience Result type for API calls.
pub type Result<T> = std::result::Result<T, ApiError>;
