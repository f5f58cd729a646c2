//! Domain service for administrator accounts.
//!
//! Handles registration and credential checks. Session handling stays in the
//! HTTP layers, which store the returned [`Principal`].

use thiserror::Error;

use crate::models::{AdminInfo, Credentials, FieldErrors, Principal};

/// Shown for every failed login so callers cannot tell which field was wrong.
pub const INVALID_CREDENTIALS: &str = "Username or password is incorrect";

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username or password is incorrect")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<FieldErrors> for AuthError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the principal to attach to the session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown username or a
    /// wrong password alike.
    async fn login(&self, credentials: &Credentials) -> Result<Principal, AuthError>;

    /// Creates a new administrator with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::DuplicateUsername`] if the username is taken.
    async fn register(&self, credentials: &Credentials) -> Result<AdminInfo, AuthError>;
}
