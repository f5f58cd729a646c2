use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{HOME_PATH, WebError, views};
use crate::api::AppState;
use crate::models::{FieldErrors, Genre, MovieFilter, MovieForm, Principal};
use crate::services::CatalogError;

/// Raw movie form fields. Browsers send empty strings for blank inputs, so
/// numbers are parsed here; blank or unparsable values count as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieFormInput {
    pub movie_id: String,
    pub name: String,
    pub year: String,
    pub rating: String,
    pub genre_id: String,
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn number(value: &str) -> Option<i32> {
    value.trim().parse().ok()
}

impl From<MovieFormInput> for MovieForm {
    fn from(input: MovieFormInput) -> Self {
        Self {
            movie_id: number(&input.movie_id).unwrap_or_default(),
            year: number(&input.year),
            rating: number(&input.rating),
            name: non_blank(input.name),
            genre_id: non_blank(input.genre_id),
        }
    }
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(filter): Query<MovieFilter>,
) -> Result<Html<String>, WebError> {
    let movies = state.movie_service().filter(&filter).await?;
    let genre_names = state.movie_service().genre_names_in_use().await?;

    Ok(views::index_page(&principal, &movies, &genre_names, &filter))
}

/// GET /genre
pub async fn genres(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Html<String>, WebError> {
    let genres = state.genre_service().list().await?;
    Ok(views::genres_page(
        &principal,
        &genres,
        &Genre::default(),
        &FieldErrors::new(),
    ))
}

/// POST /genre
pub async fn add_genre(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Form(genre): Form<Genre>,
) -> Result<Response, WebError> {
    let errors = match state.genre_service().add(genre.clone()).await {
        Ok(_) => return Ok(Redirect::to("/genre").into_response()),
        Err(CatalogError::Validation(errors)) => errors,
        Err(CatalogError::DuplicateKey(_)) => {
            FieldErrors::single("genre_id", "This code is already in use")
        }
        Err(e) => return Err(e.into()),
    };

    let genres = state.genre_service().list().await?;
    Ok(views::genres_page(&principal, &genres, &genre, &errors).into_response())
}

async fn render_movie_form(
    state: &AppState,
    principal: &Principal,
    form: &MovieForm,
    errors: &FieldErrors,
) -> Result<Html<String>, WebError> {
    let genres = state.genre_service().list().await?;
    Ok(views::movie_form_page(principal, form, &genres, errors))
}

/// GET /movie/create
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Html<String>, WebError> {
    render_movie_form(&state, &principal, &MovieForm::default(), &FieldErrors::new()).await
}

/// GET /movie/edit/{id}
pub async fn edit_movie(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> Result<Html<String>, WebError> {
    let movie = state.movie_service().get(id).await?;
    render_movie_form(&state, &principal, &MovieForm::from(&movie), &FieldErrors::new()).await
}

/// GET /movie/edit/{id}/{slug}
/// The slug only decorates the URL.
pub async fn edit_movie_with_slug(
    state: State<Arc<AppState>>,
    principal: Extension<Principal>,
    Path((id, _slug)): Path<(i32, String)>,
) -> Result<Html<String>, WebError> {
    edit_movie(state, principal, Path(id)).await
}

/// POST /movie/edit
/// Id 0 creates, anything else updates.
pub async fn save_movie(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Form(input): Form<MovieFormInput>,
) -> Result<Response, WebError> {
    let form = MovieForm::from(input);

    match state.movie_service().save(&form).await {
        Ok(_) => Ok(Redirect::to(HOME_PATH).into_response()),
        Err(CatalogError::Validation(errors)) => {
            let page = render_movie_form(&state, &principal, &form, &errors).await?;
            Ok(page.into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /movie/delete/{id}
pub async fn confirm_delete_movie(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i32>,
) -> Result<Html<String>, WebError> {
    let movie = state.movie_service().get(id).await?;
    Ok(views::delete_page(&principal, &movie))
}

/// POST /movie/delete/{id}
/// Missing movies are ignored.
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Redirect, WebError> {
    state.movie_service().delete(id).await?;
    Ok(Redirect::to(HOME_PATH))
}
