use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, GenreService, MovieService, SeaOrmAuthService, SeaOrmGenreService,
    SeaOrmMovieService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub genre_service: Arc<dyn GenreService>,

    pub movie_service: Arc<dyn MovieService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        if config.catalog.seed_sample_data && store.seed_sample_data().await? {
            info!("Empty catalog initialized with sample data");
        }

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService>;

        let genre_service = Arc::new(SeaOrmGenreService::new(store.clone()))
            as Arc<dyn GenreService>;

        let movie_service = Arc::new(SeaOrmMovieService::new(store.clone()))
            as Arc<dyn MovieService>;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            auth_service,
            genre_service,
            movie_service,
        })
    }
}
