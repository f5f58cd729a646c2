use serde::Serialize;

use crate::models::FieldErrors;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: None,
        }
    }

    pub fn invalid(message: impl Into<String>, errors: FieldErrors) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            errors: Some(errors),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Returned by registration; never carries the password hash.
#[derive(Debug, Serialize)]
pub struct RegisteredAdmin {
    pub id: i32,
    pub username: String,
}
