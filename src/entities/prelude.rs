pub use super::admins::Entity as Admins;
pub use super::genres::Entity as Genres;
pub use super::movies::Entity as Movies;
