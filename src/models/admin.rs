use serde::{Deserialize, Serialize};

use super::field_errors::{FieldErrors, is_blank};

pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MAX_LEN: usize = 100;

/// The authenticated identity carried by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub admin_id: i32,
    pub username: String,
}

/// Public view of an administrator record; never includes the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminInfo {
    pub id: i32,
    pub username: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn validate_login(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_username(&self.username, &mut errors);
        if self.password.is_empty() {
            errors.add("password", "Please enter a password");
        }
        errors.into_result(())
    }

    pub fn validate_registration(&self, min_password_length: usize) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_username(&self.username, &mut errors);

        let length = self.password.chars().count();
        if self.password.is_empty() {
            errors.add("password", "Please enter a password");
        } else if length < min_password_length {
            errors.add(
                "password",
                format!("Password must be at least {min_password_length} characters"),
            );
        } else if length > PASSWORD_MAX_LEN {
            errors.add(
                "password",
                format!("Password must be {PASSWORD_MAX_LEN} characters or less"),
            );
        }

        errors.into_result(())
    }
}

fn check_username(username: &str, errors: &mut FieldErrors) {
    if is_blank(Some(username)) {
        errors.add("username", "Please enter a username");
    } else if username.chars().count() > USERNAME_MAX_LEN {
        errors.add(
            "username",
            format!("Username must be {USERNAME_MAX_LEN} characters or less"),
        );
    }
}
