use axum::{
    Extension, Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use tower_sessions::{Session, session};

use super::{ApiError, ApiJson, ApiResponse, AppState, MessageResponse, RegisteredAdmin};
use crate::models::{Credentials, Principal};

/// Session key holding the serialized [`Principal`].
pub const PRINCIPAL_KEY: &str = "principal";

// ============================================================================
// Session helpers
// ============================================================================

/// The signed-in administrator, if any. A session that cannot be read counts
/// as anonymous.
pub async fn current_principal(session: &Session) -> Option<Principal> {
    session.get::<Principal>(PRINCIPAL_KEY).await.ok().flatten()
}

/// Attaches the principal to a fresh session id.
pub async fn sign_in(session: &Session, principal: &Principal) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session.insert(PRINCIPAL_KEY, principal).await
}

/// Drops the session entirely; a missing session is not an error.
pub async fn sign_out(session: &Session) -> Result<(), session::Error> {
    session.flush().await
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests without a signed-in administrator with 401 and makes the
/// principal available to handlers as an extension.
pub async fn auth_middleware(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let Some(principal) = current_principal(&session).await else {
        return Err(ApiError::unauthorized());
    };

    tracing::Span::current().record("user", principal.username.as_str());
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredAdmin>>), ApiError> {
    let admin = state.auth_service().register(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RegisteredAdmin {
            id: admin.id,
            username: admin.username,
        })),
    ))
}

/// POST /auth/login
/// Establishes a session cookie for the administrator.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    ApiJson(payload): ApiJson<Credentials>,
) -> Result<Json<ApiResponse<Principal>>, ApiError> {
    let principal = state.auth_service().login(&payload).await?;
    sign_in(&session, &principal)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to store session: {e}")))?;

    Ok(Json(ApiResponse::success(principal)))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    sign_out(&session)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to clear session: {e}")))?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// GET /auth/me
pub async fn me(Extension(principal): Extension<Principal>) -> Json<ApiResponse<Principal>> {
    Json(ApiResponse::success(principal))
}
