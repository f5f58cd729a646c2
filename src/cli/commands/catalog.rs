//! Catalog listing command handlers

use crate::config::Config;
use crate::db::Store;
use crate::models::MovieFilter;
use crate::services::{MovieService, SeaOrmMovieService};

async fn open_store(config: &Config) -> anyhow::Result<Store> {
    let store = Store::new(&config.general.database_path).await?;
    if config.catalog.seed_sample_data {
        store.seed_sample_data().await?;
    }
    Ok(store)
}

pub async fn cmd_list_genres(config: &Config) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let genres = store.list_genres().await?;

    if genres.is_empty() {
        println!("No genres defined.");
        return Ok(());
    }

    println!("Genres ({} total)", genres.len());
    println!("{:-<30}", "");
    for genre in genres {
        println!("{:<4} {}", genre.genre_id, genre.name);
    }

    Ok(())
}

pub async fn cmd_list_movies(
    config: &Config,
    search: Option<&str>,
    genre: Option<&str>,
) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let movies = SeaOrmMovieService::new(store)
        .filter(&MovieFilter::new(search, genre))
        .await?;

    if movies.is_empty() {
        println!("No movies found.");
        return Ok(());
    }

    println!("Movies ({} total)", movies.len());
    println!("{:-<70}", "");
    for movie in movies {
        println!(
            "{:>4}  {:<36} {}  {:>2}/10  {}",
            movie.id, movie.name, movie.year, movie.rating, movie.genre_name
        );
    }

    Ok(())
}
