mod admin;
mod catalog;

pub use admin::cmd_create_admin;
pub use catalog::{cmd_list_genres, cmd_list_movies};
