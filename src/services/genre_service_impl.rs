//! `SeaORM` implementation of the `GenreService` trait.

use crate::db::Store;
use crate::models::Genre;
use crate::services::{CatalogError, GenreService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmGenreService {
    store: Store,
}

impl SeaOrmGenreService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl GenreService for SeaOrmGenreService {
    async fn list(&self) -> Result<Vec<Genre>, CatalogError> {
        Ok(self.store.list_genres().await?)
    }

    async fn get(&self, code: &str) -> Result<Genre, CatalogError> {
        self.store
            .get_genre(code)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Genre '{code}'")))
    }

    async fn add(&self, genre: Genre) -> Result<Genre, CatalogError> {
        genre.validate()?;

        if self.store.get_genre(&genre.genre_id).await?.is_some() {
            return Err(CatalogError::DuplicateKey(format!(
                "Genre '{}'",
                genre.genre_id
            )));
        }

        let created = self
            .store
            .add_genre(&genre)
            .await?
            .ok_or_else(|| CatalogError::DuplicateKey(format!("Genre '{}'", genre.genre_id)))?;

        info!(code = %created.genre_id, name = %created.name, "Genre added");
        Ok(created)
    }

    async fn update(&self, code: &str, genre: Genre) -> Result<(), CatalogError> {
        if genre.genre_id != code {
            return Err(CatalogError::IdMismatch);
        }
        genre.validate()?;

        if !self.store.rename_genre(code, &genre.name).await? {
            return Err(CatalogError::NotFound(format!("Genre '{code}'")));
        }

        info!(code, name = %genre.name, "Genre updated");
        Ok(())
    }

    async fn delete(&self, code: &str) -> Result<u64, CatalogError> {
        let removed = self
            .store
            .delete_genre(code)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Genre '{code}'")))?;

        info!(code, movies_removed = removed, "Genre deleted");
        Ok(removed)
    }
}
