//! Server-rendered admin pages.
//!
//! Everything except the `/admin/*` account pages requires a signed-in
//! administrator; anonymous visitors are redirected to the login page.

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use std::sync::Arc;
use tower_sessions::Session;

use crate::api::AppState;
use crate::api::auth::current_principal;

mod admin;
mod catalog;
mod error;
mod views;

pub use error::WebError;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/admin/login";

/// Redirects anonymous visitors to the login page and hands the principal to
/// the page handlers.
pub async fn require_admin(session: Session, mut request: Request, next: Next) -> Response {
    let Some(principal) = current_principal(&session).await else {
        return Redirect::to(LOGIN_PATH).into_response();
    };

    tracing::Span::current().record("user", principal.username.as_str());
    request.extensions_mut().insert(principal);
    next.run(request).await
}

pub fn router() -> Router<Arc<AppState>> {
    let pages = Router::new()
        .route(HOME_PATH, get(catalog::index))
        .route("/genre", get(catalog::genres).post(catalog::add_genre))
        .route("/movie/create", get(catalog::create_movie))
        .route("/movie/edit", post(catalog::save_movie))
        .route("/movie/edit/{id}", get(catalog::edit_movie))
        .route("/movie/edit/{id}/{slug}", get(catalog::edit_movie_with_slug))
        .route(
            "/movie/delete/{id}",
            get(catalog::confirm_delete_movie).post(catalog::delete_movie),
        )
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .merge(pages)
        .route(
            LOGIN_PATH,
            get(admin::login_form).post(admin::login_submit),
        )
        .route(
            "/admin/register",
            get(admin::register_form).post(admin::register_submit),
        )
        .route("/admin/logout", get(admin::logout))
}
