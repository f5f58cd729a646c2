use serde::{Deserialize, Serialize};

use super::field_errors::{FieldErrors, is_blank};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2025;
pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 10;

pub const NAME_REQUIRED: &str = "Please enter a name";
pub const YEAR_REQUIRED: &str = "Please enter a year";
pub const YEAR_RANGE: &str = "Year must be between 1900 and 2025";
pub const RATING_REQUIRED: &str = "Please enter a rating";
// Accepted range is MIN_RATING..=MAX_RATING even though the text says 1.
pub const RATING_RANGE: &str = "Rating must be between 1 and 10";
pub const GENRE_REQUIRED: &str = "Please enter a genre";
pub const GENRE_UNKNOWN: &str = "Please select a valid genre";

/// A movie joined with its genre, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub name: String,
    pub year: i32,
    pub rating: i32,
    pub genre_id: String,
    pub genre_name: String,
    pub slug: String,
}

impl Movie {
    #[must_use]
    pub fn new(
        id: i32,
        name: String,
        year: i32,
        rating: i32,
        genre_id: String,
        genre_name: String,
    ) -> Self {
        let slug = slug(&name, year);
        Self {
            id,
            name,
            year,
            rating,
            genre_id,
            genre_name,
            slug,
        }
    }
}

/// URL fragment such as `the-matrix-1999`.
#[must_use]
pub fn slug(name: &str, year: i32) -> String {
    format!("{}-{year}", name.replace(' ', "-").to_lowercase())
}

/// Unvalidated movie input. `movie_id == 0` means "new".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieForm {
    pub movie_id: i32,
    pub name: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<i32>,
    pub genre_id: Option<String>,
}

/// Movie fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub name: String,
    pub year: i32,
    pub rating: i32,
    pub genre_id: String,
}

impl MovieForm {
    #[must_use]
    pub const fn is_new(&self) -> bool {
        self.movie_id == 0
    }

    pub fn validate(&self) -> Result<MovieDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        if is_blank(self.name.as_deref()) {
            errors.add("name", NAME_REQUIRED);
        }

        match self.year {
            None => errors.add("year", YEAR_REQUIRED),
            Some(year) if !(MIN_YEAR..=MAX_YEAR).contains(&year) => {
                errors.add("year", YEAR_RANGE);
            }
            Some(_) => {}
        }

        match self.rating {
            None => errors.add("rating", RATING_REQUIRED),
            Some(rating) if !(MIN_RATING..=MAX_RATING).contains(&rating) => {
                errors.add("rating", RATING_RANGE);
            }
            Some(_) => {}
        }

        if is_blank(self.genre_id.as_deref()) {
            errors.add("genre_id", GENRE_REQUIRED);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(MovieDraft {
            name: self.name.clone().unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
            genre_id: self.genre_id.clone().unwrap_or_default(),
        })
    }
}

impl From<&Movie> for MovieForm {
    fn from(movie: &Movie) -> Self {
        Self {
            movie_id: movie.id,
            name: Some(movie.name.clone()),
            year: Some(movie.year),
            rating: Some(movie.rating),
            genre_id: Some(movie.genre_id.clone()),
        }
    }
}
