//! Domain service for the genre list.

use crate::models::Genre;
use crate::services::CatalogError;

#[async_trait::async_trait]
pub trait GenreService: Send + Sync {
    /// All genres sorted by display name.
    async fn list(&self) -> Result<Vec<Genre>, CatalogError>;

    async fn get(&self, code: &str) -> Result<Genre, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateKey`] if the code exists. Codes are
    /// case-sensitive.
    async fn add(&self, genre: Genre) -> Result<Genre, CatalogError>;

    /// Renames the genre at `code`. The body's code must equal `code`.
    async fn update(&self, code: &str, genre: Genre) -> Result<(), CatalogError>;

    /// Removes the genre and every movie filed under it; returns how many
    /// movies went with it.
    async fn delete(&self, code: &str) -> Result<u64, CatalogError>;
}
