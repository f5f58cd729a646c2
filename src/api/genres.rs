use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiJson, ApiResponse, AppState};
use crate::models::Genre;

/// GET /genres
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Genre>>>, ApiError> {
    let genres = state.genre_service().list().await?;
    Ok(Json(ApiResponse::success(genres)))
}

/// GET /genres/{code}
pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    let genre = state.genre_service().get(&code).await?;
    Ok(Json(ApiResponse::success(genre)))
}

/// POST /genres
pub async fn create_genre(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<Genre>,
) -> Result<(StatusCode, Json<ApiResponse<Genre>>), ApiError> {
    let genre = state.genre_service().add(payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(genre))))
}

/// PUT /genres/{code}
/// The body's `genre_id` must repeat the path code.
pub async fn update_genre(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    ApiJson(payload): ApiJson<Genre>,
) -> Result<StatusCode, ApiError> {
    state.genre_service().update(&code, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /genres/{code}
/// Movies filed under the genre are removed with it.
pub async fn delete_genre(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.genre_service().delete(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}
