pub mod prelude;

pub mod admins;
pub mod genres;
pub mod movies;
