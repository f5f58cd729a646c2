//! Name/genre filtering for the movie list.
//!
//! A name query matches the start of the first word or of any later word
//! (a space immediately followed by the query), ignoring case. It is not a
//! general substring search: `"ynep"` does not match `"melis zeynep sema"`.
//! A genre matches only on exact, case-sensitive equality with the stored
//! display name. Blank inputs disable their filter; both filters combine
//! with AND.

use serde::Deserialize;

use super::movie::Movie;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MovieFilter {
    pub search_string: Option<String>,
    pub genre: Option<String>,
}

impl MovieFilter {
    #[must_use]
    pub fn new(search_string: Option<&str>, genre: Option<&str>) -> Self {
        Self {
            search_string: search_string.map(str::to_string),
            genre: genre.map(str::to_string),
        }
    }

    /// The name query, or `None` when absent or blank.
    #[must_use]
    pub fn name_query(&self) -> Option<&str> {
        self.search_string
            .as_deref()
            .filter(|q| !q.trim().is_empty())
    }

    /// The genre display name, or `None` when absent or blank.
    #[must_use]
    pub fn genre_name(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.trim().is_empty())
    }

    #[must_use]
    pub fn matches(&self, movie_name: &str, genre_name: &str) -> bool {
        let name_ok = self
            .name_query()
            .is_none_or(|query| name_matches(movie_name, query));
        let genre_ok = self.genre_name().is_none_or(|genre| genre == genre_name);

        name_ok && genre_ok
    }

    /// Keeps the matching movies in their original order.
    #[must_use]
    pub fn apply(&self, movies: Vec<Movie>) -> Vec<Movie> {
        movies
            .into_iter()
            .filter(|m| self.matches(&m.name, &m.genre_name))
            .collect()
    }
}

#[must_use]
pub fn name_matches(name: &str, query: &str) -> bool {
    let name = name.to_lowercase();
    let query = query.to_lowercase();

    name.starts_with(&query) || name.contains(&format!(" {query}"))
}
