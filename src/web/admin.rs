use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{HOME_PATH, LOGIN_PATH, WebError, views};
use crate::api::AppState;
use crate::api::auth::{sign_in, sign_out};
use crate::models::{Credentials, FieldErrors};
use crate::services::AuthError;
use crate::services::auth_service::INVALID_CREDENTIALS;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// GET /admin/login
pub async fn login_form() -> impl IntoResponse {
    views::login_page("", None, &FieldErrors::new())
}

/// POST /admin/login
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(credentials): Form<Credentials>,
) -> Result<Response, WebError> {
    match state.auth_service().login(&credentials).await {
        Ok(principal) => {
            sign_in(&session, &principal).await?;
            Ok(Redirect::to(HOME_PATH).into_response())
        }
        Err(AuthError::InvalidCredentials) => Ok(views::login_page(
            &credentials.username,
            Some(INVALID_CREDENTIALS),
            &FieldErrors::new(),
        )
        .into_response()),
        Err(AuthError::Validation(errors)) => {
            Ok(views::login_page(&credentials.username, None, &errors).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /admin/register
pub async fn register_form() -> impl IntoResponse {
    views::register_page("", &FieldErrors::new())
}

/// POST /admin/register
pub async fn register_submit(
    State(state): State<Arc<AppState>>,
    Form(input): Form<RegisterInput>,
) -> Result<Response, WebError> {
    let credentials = Credentials {
        username: input.username,
        password: input.password,
    };

    let min_length = state.config().read().await.security.min_password_length;
    let mut errors = credentials
        .validate_registration(min_length)
        .err()
        .unwrap_or_default();
    if credentials.password != input.confirm_password {
        errors.add("confirm_password", "Passwords do not match");
    }
    if !errors.is_empty() {
        return Ok(views::register_page(&credentials.username, &errors).into_response());
    }

    match state.auth_service().register(&credentials).await {
        Ok(_) => Ok(Redirect::to(LOGIN_PATH).into_response()),
        Err(AuthError::DuplicateUsername(_)) => {
            let errors = FieldErrors::single("username", "Username already exists");
            Ok(views::register_page(&credentials.username, &errors).into_response())
        }
        Err(AuthError::Validation(errors)) => {
            Ok(views::register_page(&credentials.username, &errors).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /admin/logout
pub async fn logout(session: Session) -> Result<Redirect, WebError> {
    sign_out(&session).await?;
    Ok(Redirect::to(LOGIN_PATH))
}
