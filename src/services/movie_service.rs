//! Domain service for movies and the filter query.

use crate::models::{Movie, MovieFilter, MovieForm};
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// All movies with their genre names, ordered by id.
    async fn list(&self) -> Result<Vec<Movie>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Movie, CatalogError>;

    /// Validates the form and stores a new movie; the form's id is ignored.
    async fn create(&self, form: &MovieForm) -> Result<Movie, CatalogError>;

    /// Overwrites every field of movie `id`. The form's id must equal `id`.
    async fn update(&self, id: i32, form: &MovieForm) -> Result<Movie, CatalogError>;

    /// Creates when the form's id is 0, otherwise updates.
    async fn save(&self, form: &MovieForm) -> Result<Movie, CatalogError>;

    /// Idempotent. Returns whether a movie was actually removed.
    async fn delete(&self, id: i32) -> Result<bool, CatalogError>;

    /// Movies matching the name/genre filter, ordered by id.
    async fn filter(&self, filter: &MovieFilter) -> Result<Vec<Movie>, CatalogError>;

    /// Distinct genre names that at least one movie uses, sorted.
    async fn genre_names_in_use(&self) -> Result<Vec<String>, CatalogError>;
}
