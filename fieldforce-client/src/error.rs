//! Error types for the client SDK.

use crate::config::ConfigError;
use crate::store::StoreError;
use fieldforce_core::{classify, ApiFailure, ErrorAction};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Failure building the underlying HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiFailure),
    /// Client-side validation failed before any request was sent.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    /// The server answered 2xx but reported the login unsuccessful.
    #[error("Login rejected: {message}")]
    LoginRejected { message: String },
}

impl ClientError {
    /// Presentation decision for this error, when it came from the API.
    /// The caller is responsible for acting on `logout = true`.
    pub fn action(&self) -> Option<ErrorAction> {
        match self {
            ClientError::Api(failure) => Some(classify(failure)),
            _ => None,
        }
    }
}
