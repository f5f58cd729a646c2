use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

use crate::db::is_unique_violation;
use crate::entities::{genres, movies, prelude::*};
use crate::models::Genre;

impl From<genres::Model> for Genre {
    fn from(model: genres::Model) -> Self {
        Self {
            genre_id: model.genre_id,
            name: model.name,
        }
    }
}

pub struct GenreRepository {
    conn: DatabaseConnection,
}

impl GenreRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All genres sorted by display name.
    pub async fn list(&self) -> Result<Vec<Genre>> {
        let rows = Genres::find()
            .order_by_asc(genres::Column::Name)
            .order_by_asc(genres::Column::GenreId)
            .all(&self.conn)
            .await
            .context("Failed to list genres")?;

        Ok(rows.into_iter().map(Genre::from).collect())
    }

    pub async fn get(&self, code: &str) -> Result<Option<Genre>> {
        let row = Genres::find_by_id(code.to_string())
            .one(&self.conn)
            .await
            .context("Failed to query genre")?;

        Ok(row.map(Genre::from))
    }

    pub async fn count(&self) -> Result<u64> {
        Genres::find()
            .count(&self.conn)
            .await
            .context("Failed to count genres")
    }

    /// Returns `None` when the code is already taken.
    pub async fn insert(&self, genre: &Genre) -> Result<Option<Genre>> {
        let active = genres::ActiveModel {
            genre_id: Set(genre.genre_id.clone()),
            name: Set(genre.name.clone()),
        };

        match Genres::insert(active).exec_without_returning(&self.conn).await {
            Ok(_) => Ok(Some(genre.clone())),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to insert genre"),
        }
    }

    /// Returns `false` when no genre has this code.
    pub async fn rename(&self, code: &str, name: &str) -> Result<bool> {
        let result = Genres::update_many()
            .col_expr(genres::Column::Name, Expr::value(name.to_string()))
            .filter(genres::Column::GenreId.eq(code))
            .exec(&self.conn)
            .await
            .context("Failed to update genre")?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes the genre together with the movies filed under it.
    /// Returns the number of movies removed, or `None` if the genre was absent.
    pub async fn delete_cascade(&self, code: &str) -> Result<Option<u64>> {
        let txn = self.conn.begin().await?;

        if Genres::find_by_id(code.to_string()).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(None);
        }

        // Movies first so the count is not swallowed by the FK cascade.
        let movies = Movies::delete_many()
            .filter(movies::Column::GenreId.eq(code))
            .exec(&txn)
            .await
            .context("Failed to delete movies of genre")?;

        Genres::delete_by_id(code.to_string())
            .exec(&txn)
            .await
            .context("Failed to delete genre")?;

        txn.commit().await?;
        Ok(Some(movies.rows_affected))
    }
}
