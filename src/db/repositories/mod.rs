pub mod admin;
pub mod genre;
pub mod movie;
