//! Error types for the user API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant so a by-id lookup can tell "no such
//! user" apart from everything else. All other failures (unexpected status,
//! unreachable host, malformed body) are transport-level failures.

use thiserror::Error;

/// Errors returned by `UserClient` and `UserRepository` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested user does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned an unexpected status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connect, timeout, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The configured base URL does not parse or cannot carry a path.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
