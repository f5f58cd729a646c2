pub mod catalog_error;
pub use catalog_error::CatalogError;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService};
pub use auth_service_impl::SeaOrmAuthService;

pub mod genre_service;
pub mod genre_service_impl;
pub use genre_service::GenreService;
pub use genre_service_impl::SeaOrmGenreService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::MovieService;
pub use movie_service_impl::SeaOrmMovieService;
