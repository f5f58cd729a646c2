use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::models::FieldErrors;
use crate::services::{AuthError, CatalogError, auth_service::INVALID_CREDENTIALS};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    ValidationError(String),

    InvalidFields(FieldErrors),

    Conflict(String),

    InternalError(String),

    Unauthorized(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::InvalidFields(errors) => write!(f, "Validation error: {}", errors),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::<()>::error(msg)),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("A database error occurred"),
                )
            }
            ApiError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, ApiResponse::error(msg))
            }
            ApiError::InvalidFields(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::invalid("Validation failed", errors),
            ),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ApiResponse::error(msg)),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("An internal error occurred"),
                )
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiResponse::error(msg)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(errors) => Self::InvalidFields(errors),
            CatalogError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            CatalogError::DuplicateKey(what) => Self::Conflict(format!("{what} already exists")),
            err @ CatalogError::IdMismatch => Self::validation(err.to_string()),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
            CatalogError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized(INVALID_CREDENTIALS.to_string()),
            AuthError::DuplicateUsername(name) => {
                Self::Conflict(format!("Username '{name}' already exists"))
            }
            AuthError::Validation(errors) => Self::InvalidFields(errors),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Authentication required".to_string())
    }
}
