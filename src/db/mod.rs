use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Set, SqlErr, Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::movies;
use crate::models::{AdminInfo, Genre, Movie, MovieDraft};

pub mod migrator;
pub mod repositories;

pub use repositories::movie::MovieWrite;

const SAMPLE_GENRES: &[(&str, &str)] = &[
    ("D", "Drama"),
    ("C", "Comedy"),
    ("A", "Action"),
    ("H", "Horror"),
    ("M", "Musical"),
    ("R", "RomCom"),
    ("S", "SciFi"),
];

const SAMPLE_MOVIES: &[(&str, i32, i32, &str)] = &[
    ("Inception", 2010, 8, "D"),
    ("The Matrix", 1999, 9, "D"),
    ("Interstellar", 2014, 8, "A"),
];

/// True for both unique-index and primary-key violations.
/// SQLite reports the latter with an extended code sqlx does not classify.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        || err.to_string().contains("UNIQUE constraint failed")
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to `:memory:` would open its own empty database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);
        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn genre_repo(&self) -> repositories::genre::GenreRepository {
        repositories::genre::GenreRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn admin_repo(&self) -> repositories::admin::AdminRepository {
        repositories::admin::AdminRepository::new(self.conn.clone())
    }

    /// Loads the sample catalog into a database that has no genres yet.
    /// Returns whether anything was written.
    pub async fn seed_sample_data(&self) -> Result<bool> {
        if self.genre_repo().count().await? > 0 {
            return Ok(false);
        }

        for (code, name) in SAMPLE_GENRES {
            self.genre_repo().insert(&Genre::new(*code, *name)).await?;
        }

        let rows = SAMPLE_MOVIES
            .iter()
            .map(|(name, year, rating, genre_id)| movies::ActiveModel {
                name: Set((*name).to_string()),
                year: Set(*year),
                rating: Set(*rating),
                genre_id: Set((*genre_id).to_string()),
                ..Default::default()
            })
            .collect();
        self.movie_repo().insert_many(rows).await?;

        info!(
            genres = SAMPLE_GENRES.len(),
            movies = SAMPLE_MOVIES.len(),
            "Seeded sample catalog"
        );
        Ok(true)
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>> {
        self.genre_repo().list().await
    }

    pub async fn get_genre(&self, code: &str) -> Result<Option<Genre>> {
        self.genre_repo().get(code).await
    }

    pub async fn add_genre(&self, genre: &Genre) -> Result<Option<Genre>> {
        self.genre_repo().insert(genre).await
    }

    pub async fn rename_genre(&self, code: &str, name: &str) -> Result<bool> {
        self.genre_repo().rename(code, name).await
    }

    pub async fn delete_genre(&self, code: &str) -> Result<Option<u64>> {
        self.genre_repo().delete_cascade(code).await
    }

    pub async fn list_movies(&self, genre_name: Option<&str>) -> Result<Vec<Movie>> {
        self.movie_repo().list(genre_name).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn add_movie(&self, draft: &MovieDraft) -> Result<MovieWrite> {
        self.movie_repo().insert(draft).await
    }

    pub async fn update_movie(&self, id: i32, draft: &MovieDraft) -> Result<MovieWrite> {
        self.movie_repo().update(id, draft).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().delete(id).await
    }

    pub async fn admin_exists(&self, username: &str) -> Result<bool> {
        self.admin_repo().exists(username).await
    }

    pub async fn create_admin(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<AdminInfo>> {
        self.admin_repo().create(username, password, security).await
    }

    pub async fn verify_admin_password(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<AdminInfo>> {
        self.admin_repo()
            .verify_password(username, password, security)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (Store, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("cinedex-store-{}.db", uuid::Uuid::new_v4()));
        let url = format!("sqlite:{}", path.display());
        let store = Store::new(&url).await.unwrap();
        (store, path)
    }

    fn draft(name: &str, year: i32, genre_id: &str) -> MovieDraft {
        MovieDraft {
            name: name.to_string(),
            year,
            rating: 7,
            genre_id: genre_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_database_keeps_schema() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.ping().await.unwrap();
        assert!(store.list_genres().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let (store, path) = temp_store().await;

        assert!(store.seed_sample_data().await.unwrap());
        assert!(!store.seed_sample_data().await.unwrap());

        let genres = store.list_genres().await.unwrap();
        assert_eq!(genres.len(), 7);
        assert_eq!(genres[0].name, "Action");

        let movies = store.list_movies(None).await.unwrap();
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[1].name, "The Matrix");
        assert_eq!(movies[1].genre_name, "Drama");
        assert_eq!(movies[1].slug, "the-matrix-1999");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_genre_codes_are_case_sensitive_and_unique() {
        let (store, path) = temp_store().await;

        assert!(store.add_genre(&Genre::new("A", "Action")).await.unwrap().is_some());
        assert!(store.add_genre(&Genre::new("a", "Arthouse")).await.unwrap().is_some());
        assert!(store.add_genre(&Genre::new("A", "Again")).await.unwrap().is_none());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_delete_genre_removes_its_movies() {
        let (store, path) = temp_store().await;
        store.add_genre(&Genre::new("D", "Drama")).await.unwrap();
        store.add_genre(&Genre::new("C", "Comedy")).await.unwrap();
        store.add_movie(&draft("Heat", 1995, "D")).await.unwrap();
        store.add_movie(&draft("Airplane", 1980, "C")).await.unwrap();

        assert_eq!(store.delete_genre("D").await.unwrap(), Some(1));
        assert_eq!(store.delete_genre("D").await.unwrap(), None);

        let movies = store.list_movies(None).await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].name, "Airplane");

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_movie_writes_check_genre_and_existence() {
        let (store, path) = temp_store().await;
        store.add_genre(&Genre::new("D", "Drama")).await.unwrap();

        assert_eq!(
            store.add_movie(&draft("Heat", 1995, "X")).await.unwrap(),
            MovieWrite::GenreMissing
        );

        let MovieWrite::Saved(movie) = store.add_movie(&draft("Heat", 1995, "D")).await.unwrap()
        else {
            panic!("insert should succeed");
        };

        assert_eq!(
            store.update_movie(999, &draft("Heat", 1995, "D")).await.unwrap(),
            MovieWrite::MovieMissing
        );

        // Same values twice is fine.
        for _ in 0..2 {
            let outcome = store
                .update_movie(movie.id, &draft("Heat", 1996, "D"))
                .await
                .unwrap();
            assert!(matches!(outcome, MovieWrite::Saved(ref m) if m.year == 1996));
        }

        assert!(store.delete_movie(movie.id).await.unwrap());
        assert!(!store.delete_movie(movie.id).await.unwrap());

        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_list_movies_by_genre_name() {
        let (store, path) = temp_store().await;
        store.seed_sample_data().await.unwrap();

        let drama = store.list_movies(Some("Drama")).await.unwrap();
        assert_eq!(drama.len(), 2);
        assert!(store.list_movies(Some("drama")).await.unwrap().is_empty());

        std::fs::remove_file(path).ok();
    }
}
