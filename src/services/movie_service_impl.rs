//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::{MovieWrite, Store};
use crate::models::movie::GENRE_UNKNOWN;
use crate::models::{FieldErrors, Movie, MovieDraft, MovieFilter, MovieForm};
use crate::services::{CatalogError, MovieService};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tracing::info;

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    fn resolve(id: i32, outcome: MovieWrite) -> Result<Movie, CatalogError> {
        match outcome {
            MovieWrite::Saved(movie) => Ok(movie),
            MovieWrite::MovieMissing => Err(CatalogError::NotFound(format!("Movie {id}"))),
            MovieWrite::GenreMissing => Err(FieldErrors::single("genre_id", GENRE_UNKNOWN).into()),
        }
    }

    async fn write(&self, id: i32, draft: &MovieDraft) -> Result<Movie, CatalogError> {
        let outcome = if id == 0 {
            self.store.add_movie(draft).await?
        } else {
            self.store.update_movie(id, draft).await?
        };
        Self::resolve(id, outcome)
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok(self.store.list_movies(None).await?)
    }

    async fn get(&self, id: i32) -> Result<Movie, CatalogError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Movie {id}")))
    }

    async fn create(&self, form: &MovieForm) -> Result<Movie, CatalogError> {
        let draft = form.validate()?;
        let movie = self.write(0, &draft).await?;

        info!(id = movie.id, name = %movie.name, "Movie created");
        Ok(movie)
    }

    async fn update(&self, id: i32, form: &MovieForm) -> Result<Movie, CatalogError> {
        if form.movie_id != id {
            return Err(CatalogError::IdMismatch);
        }
        if id <= 0 {
            return Err(CatalogError::NotFound(format!("Movie {id}")));
        }
        let draft = form.validate()?;
        let movie = self.write(id, &draft).await?;

        info!(id, name = %movie.name, "Movie updated");
        Ok(movie)
    }

    async fn save(&self, form: &MovieForm) -> Result<Movie, CatalogError> {
        if form.is_new() {
            self.create(form).await
        } else {
            self.update(form.movie_id, form).await
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
        let removed = self.store.delete_movie(id).await?;
        if removed {
            info!(id, "Movie deleted");
        }
        Ok(removed)
    }

    async fn filter(&self, filter: &MovieFilter) -> Result<Vec<Movie>, CatalogError> {
        // Genre equality runs in SQL; the word-prefix name match runs here.
        let movies = self.store.list_movies(filter.genre_name()).await?;
        Ok(filter.apply(movies))
    }

    async fn genre_names_in_use(&self) -> Result<Vec<String>, CatalogError> {
        let names: BTreeSet<String> = self
            .store
            .list_movies(None)
            .await?
            .into_iter()
            .map(|m| m.genre_name)
            .collect();
        Ok(names.into_iter().collect())
    }
}
