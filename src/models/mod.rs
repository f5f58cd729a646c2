pub mod admin;
pub mod field_errors;
pub mod filter;
pub mod genre;
pub mod movie;

pub use admin::{AdminInfo, Credentials, Principal};
pub use field_errors::FieldErrors;
pub use filter::MovieFilter;
pub use genre::Genre;
pub use movie::{Movie, MovieDraft, MovieForm};
