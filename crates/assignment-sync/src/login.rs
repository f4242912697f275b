//! Login Form Controller
//!
//! Error/confirmation state of the login screen, independent of rendering.

use std::cell::RefCell;

use log::{info, warn};

use crate::auth::{Authenticator, Session};
use crate::error::{ApiError, AuthError};

pub const LOGIN_FAILED: &str = "Error en el inicio de sesión. Por favor, intente de nuevo.";
pub const UNEXPECTED_ERROR: &str = "Ocurrió un error inesperado. Por favor, intente de nuevo.";
pub const MISSING_EMAIL: &str = "Por favor, ingrese su correo electrónico primero";
pub const MISSING_CREDENTIALS: &str = "Por favor, ingrese su correo y contraseña";
pub const RESET_FAILED: &str =
    "Error al enviar el correo de recuperación. Por favor, intente de nuevo.";

/// What the form shows under the inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
    pub error: Option<String>,
    pub reset_sent: bool,
    pub submitting: bool,
}

pub struct LoginForm<A> {
    auth: A,
    state: RefCell<LoginState>,
}

fn user_message(err: &AuthError, fallback: &str) -> String {
    match err {
        AuthError::Rejected(message) if !message.trim().is_empty() => message.clone(),
        AuthError::Rejected(_) => fallback.to_string(),
        AuthError::MissingEmail => MISSING_EMAIL.to_string(),
        AuthError::MissingCredentials => MISSING_CREDENTIALS.to_string(),
        AuthError::Api(ApiError::Decode(_)) => UNEXPECTED_ERROR.to_string(),
        AuthError::Api(_) => fallback.to_string(),
    }
}

impl<A: Authenticator> LoginForm<A> {
    pub fn new(auth: A) -> Self {
        Self { auth, state: RefCell::new(LoginState::default()) }
    }

    pub fn state(&self) -> LoginState {
        self.state.borrow().clone()
    }

    fn fail(&self, err: &AuthError, fallback: &str) {
        self.state.borrow_mut().error = Some(user_message(err, fallback));
    }

    /// Log in; on success the caller moves to the home view
    pub async fn submit(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        self.state.borrow_mut().error = None;
        if email.is_empty() || password.is_empty() {
            let err = AuthError::MissingCredentials;
            self.fail(&err, LOGIN_FAILED);
            return Err(err);
        }

        self.state.borrow_mut().submitting = true;
        let result = self.auth.login(email, password).await;
        self.state.borrow_mut().submitting = false;

        match result {
            Ok(session) => {
                info!("[LOGIN] signed in as {}", session.email);
                Ok(session)
            }
            Err(err) => {
                warn!("[LOGIN] login failed: {}", err);
                self.fail(&err, LOGIN_FAILED);
                Err(err)
            }
        }
    }

    /// Request a password-reset mail for the typed email
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            let err = AuthError::MissingEmail;
            self.fail(&err, RESET_FAILED);
            return Err(err);
        }

        match self.auth.reset_password(email).await {
            Ok(()) => {
                let mut state = self.state.borrow_mut();
                state.reset_sent = true;
                state.error = None;
                Ok(())
            }
            Err(err) => {
                warn!("[LOGIN] password reset failed: {}", err);
                self.fail(&err, RESET_FAILED);
                Err(err)
            }
        }
    }
}
