//! Authentication
//!
//! The session collaborator behind the login form.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::api::{ensure_success, read_json};
use crate::config::ApiConfig;
use crate::error::{ApiError, AuthError};

/// Authenticated user session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
}

#[async_trait(?Send)]
pub trait Authenticator {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Ask the backend to mail a password-reset link
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ResetBody<'a> {
    email: &'a str,
}

/// REST implementation of [`Authenticator`]
#[derive(Debug, Clone)]
pub struct HttpAuthenticator {
    client: Client,
    config: ApiConfig,
}

impl HttpAuthenticator {
    pub fn new(config: ApiConfig) -> Self {
        Self { client: Client::new(), config }
    }
}

/// Server-side rejections carry a user-facing message; keep it
fn rejected(err: ApiError) -> AuthError {
    match err.server_message() {
        Some(message) => AuthError::Rejected(message.to_string()),
        None => AuthError::Api(err),
    }
}

#[async_trait(?Send)]
impl Authenticator for HttpAuthenticator {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = self.config.endpoint("auth/login");
        debug!("[AUTH] POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&LoginBody { email, password })
            .send()
            .await
            .map_err(ApiError::from)?;
        read_json(response).await.map_err(rejected)
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let url = self.config.endpoint("auth/reset-password");
        debug!("[AUTH] POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&ResetBody { email })
            .send()
            .await
            .map_err(ApiError::from)?;
        ensure_success(response).await.map(|_| ()).map_err(rejected)
    }
}
