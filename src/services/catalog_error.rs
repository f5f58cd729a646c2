use thiserror::Error;

use crate::models::FieldErrors;

/// Errors shared by the genre and movie services.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    DuplicateKey(String),

    #[error("Identifier in the path does not match the body")]
    IdMismatch,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<FieldErrors> for CatalogError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}
