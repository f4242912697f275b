//! Error Types
//!
//! Failures of the remote authority and of the operations built on it.

use thiserror::Error;

/// Result alias for remote calls
pub type ApiResult<T> = Result<T, ApiError>;

/// A remote call that did not succeed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied message, if the server sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status { status: status.as_u16(), message: String::new() }
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Synchronizer operation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("failed to load areas: {0}")]
    Load(#[source] ApiError),
    #[error("failed to replace assigned areas: {0}")]
    Commit(#[source] ApiError),
    #[error("failed to remove area: {0}")]
    Removal(#[source] ApiError),
    #[error("a commit is already in flight")]
    CommitInFlight,
    #[error("a removal is already in flight")]
    RemovalInFlight,
    #[error("synchronizer was torn down")]
    Disposed,
}

/// Login form failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("email is required")]
    MissingEmail,
    #[error("email and password are required")]
    MissingCredentials,
}
