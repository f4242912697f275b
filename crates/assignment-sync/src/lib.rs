//! Curso Assignment Sync
//!
//! UI-free core of the admin front-end:
//! - models: Area entity and wire bodies
//! - api: remote authority trait and its HTTP implementation
//! - synchronizer: local assignment view reconciled with the remote authority
//! - login: login form controller over an authentication collaborator

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod login;
pub mod models;
pub mod notify;
pub mod sets;
pub mod synchronizer;

#[cfg(test)]
mod testing;

pub use api::{AssignmentApi, HttpAssignmentApi};
pub use auth::{Authenticator, HttpAuthenticator, Session};
pub use config::ApiConfig;
pub use error::{ApiError, AuthError, SyncError};
pub use gate::ConfirmationGate;
pub use login::{LoginForm, LoginState};
pub use models::Area;
pub use notify::Notifier;
pub use sets::AssignmentSets;
pub use synchronizer::{AssignmentSnapshot, AssignmentSynchronizer, TeardownHandle};
