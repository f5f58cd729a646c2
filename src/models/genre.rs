use serde::{Deserialize, Serialize};

use super::field_errors::{FieldErrors, is_blank};

pub const CODE_MAX_LEN: usize = 1;
pub const NAME_MAX_LEN: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub genre_id: String,
    pub name: String,
}

impl Genre {
    #[must_use]
    pub fn new(genre_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            genre_id: genre_id.into(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if is_blank(Some(self.genre_id.as_str())) {
            errors.add("genre_id", "Please enter a genre code");
        } else if self.genre_id.chars().count() > CODE_MAX_LEN {
            errors.add("genre_id", "Genre code must be a single character");
        }

        if is_blank(Some(self.name.as_str())) {
            errors.add("name", "Please enter a genre name");
        } else if self.name.chars().count() > NAME_MAX_LEN {
            errors.add(
                "name",
                format!("Genre name must be {NAME_MAX_LEN} characters or less"),
            );
        }

        errors.into_result(())
    }
}
