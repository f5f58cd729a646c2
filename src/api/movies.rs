use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiJson, ApiResponse, AppState};
use crate::models::{Movie, MovieFilter, MovieForm};

/// GET /movies
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let movies = state.movie_service().list().await?;
    Ok(Json(ApiResponse::success(movies)))
}

/// GET /movies/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Movie>>, ApiError> {
    let movie = state.movie_service().get(id).await?;
    Ok(Json(ApiResponse::success(movie)))
}

/// POST /movies
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<MovieForm>,
) -> Result<(StatusCode, Json<ApiResponse<Movie>>), ApiError> {
    let movie = state.movie_service().create(&payload).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(movie))))
}

/// PUT /movies/{id}
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<MovieForm>,
) -> Result<StatusCode, ApiError> {
    state.movie_service().update(id, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /movies/{id}
/// Succeeds whether or not the movie existed.
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.movie_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /filter?search_string=&genre=
pub async fn filter_movies(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<MovieFilter>,
) -> Result<Json<ApiResponse<Vec<Movie>>>, ApiError> {
    let movies = state.movie_service().filter(&filter).await?;
    Ok(Json(ApiResponse::success(movies)))
}
