use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

use crate::config::Config;
use crate::services::{AuthService, GenreService, MovieService};
use crate::state::SharedState;

pub mod auth;
mod error;
mod extract;
mod genres;
mod movies;
mod observability;
mod system;
mod types;

pub use error::ApiError;
pub use extract::ApiJson;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn genre_service(&self) -> &Arc<dyn GenreService> {
        &self.shared.genre_service
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// The whole application: the JSON API under `/api` and the HTML pages at
/// the root, sharing one in-memory session store.
pub async fn router(state: Arc<AppState>) -> Router {
    let server = state.config().read().await.server.clone();

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(server.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_ttl_minutes,
        )));

    let api_router = Router::new()
        .merge(create_protected_router())
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready));

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .merge(crate::web::router())
        .with_state(state)
        .layer(session_layer)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_protected_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/genres", get(genres::list_genres).post(genres::create_genre))
        .route(
            "/genres/{code}",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        )
        .route("/movies", get(movies::list_movies).post(movies::create_movie))
        .route(
            "/movies/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/filter", get(movies::filter_movies))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(middleware::from_fn(auth::auth_middleware))
}
