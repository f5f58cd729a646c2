use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::entities::{genres, movies, prelude::*};
use crate::models::{Movie, MovieDraft};

fn to_movie(model: movies::Model, genre: Option<genres::Model>) -> Movie {
    Movie::new(
        model.movie_id,
        model.name,
        model.year,
        model.rating,
        model.genre_id,
        genre.map(|g| g.name).unwrap_or_default(),
    )
}

/// Outcome of writing a movie whose genre may have disappeared meanwhile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieWrite {
    Saved(Movie),
    MovieMissing,
    GenreMissing,
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Movies with their genre, ordered by id. When `genre_name` is given only
    /// movies whose genre display name is exactly equal are returned.
    pub async fn list(&self, genre_name: Option<&str>) -> Result<Vec<Movie>> {
        let mut query = Movies::find()
            .find_also_related(Genres)
            .order_by_asc(movies::Column::MovieId);

        if let Some(name) = genre_name {
            query = query.filter(genres::Column::Name.eq(name));
        }

        let rows = query
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(|(m, g)| to_movie(m, g)).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Movie>> {
        let row = Movies::find_by_id(id)
            .find_also_related(Genres)
            .one(&self.conn)
            .await
            .context("Failed to query movie")?;

        Ok(row.map(|(m, g)| to_movie(m, g)))
    }

    pub async fn insert(&self, draft: &MovieDraft) -> Result<MovieWrite> {
        let txn = self.conn.begin().await?;

        let Some(genre) = Genres::find_by_id(draft.genre_id.clone()).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(MovieWrite::GenreMissing);
        };

        let model = movies::ActiveModel {
            name: Set(draft.name.clone()),
            year: Set(draft.year),
            rating: Set(draft.rating),
            genre_id: Set(draft.genre_id.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert movie")?;

        txn.commit().await?;
        Ok(MovieWrite::Saved(to_movie(model, Some(genre))))
    }

    /// Overwrites every field. Writing identical values is not an error.
    pub async fn update(&self, id: i32, draft: &MovieDraft) -> Result<MovieWrite> {
        let txn = self.conn.begin().await?;

        if Movies::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(MovieWrite::MovieMissing);
        }

        let Some(genre) = Genres::find_by_id(draft.genre_id.clone()).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(MovieWrite::GenreMissing);
        };

        Movies::update_many()
            .set(movies::ActiveModel {
                name: Set(draft.name.clone()),
                year: Set(draft.year),
                rating: Set(draft.rating),
                genre_id: Set(draft.genre_id.clone()),
                ..Default::default()
            })
            .filter(movies::Column::MovieId.eq(id))
            .exec(&txn)
            .await
            .context("Failed to update movie")?;

        txn.commit().await?;

        let model = movies::Model {
            movie_id: id,
            name: draft.name.clone(),
            year: draft.year,
            rating: draft.rating,
            genre_id: draft.genre_id.clone(),
        };
        Ok(MovieWrite::Saved(to_movie(model, Some(genre))))
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Movies::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete movie")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn insert_many(&self, rows: Vec<movies::ActiveModel>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        Movies::insert_many(rows)
            .exec_without_returning(&self.conn)
            .await
            .context("Failed to insert movies")?;
        Ok(())
    }
}
