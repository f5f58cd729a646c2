use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::views;
use crate::services::{AuthError, CatalogError};

/// Failures a page handler could not turn into a re-rendered form.
#[derive(Debug)]
pub enum WebError {
    NotFound(String),

    BadRequest(String),

    Internal(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, views::message_page("Not Found", &msg)).into_response()
            }
            WebError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, views::message_page("Bad Request", &msg)).into_response()
            }
            WebError::Internal(msg) => {
                tracing::error!("Page failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    views::message_page("Error", "Something went wrong. Please try again."),
                )
                    .into_response()
            }
        }
    }
}

impl From<CatalogError> for WebError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            CatalogError::Database(msg) | CatalogError::Internal(msg) => Self::Internal(msg),
            other => Self::BadRequest(other.to_string()),
        }
    }
}

impl From<AuthError> for WebError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(msg) | AuthError::Internal(msg) => Self::Internal(msg),
            other => Self::BadRequest(other.to_string()),
        }
    }
}

impl From<tower_sessions::session::Error> for WebError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Internal(format!("Session error: {err}"))
    }
}
