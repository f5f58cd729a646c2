//! Create admin command handler

use std::io::BufRead;

use crate::config::Config;
use crate::db::Store;
use crate::models::Credentials;
use crate::services::{AuthError, AuthService, SeaOrmAuthService};

pub async fn cmd_create_admin(
    config: &Config,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => {
            println!("Password for {username}:");
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let store = Store::new(&config.general.database_path).await?;
    let auth = SeaOrmAuthService::new(store, config.security.clone());

    let credentials = Credentials {
        username: username.to_string(),
        password,
    };

    match auth.register(&credentials).await {
        Ok(admin) => {
            println!("Created admin '{}' (id {})", admin.username, admin.id);
            Ok(())
        }
        Err(AuthError::DuplicateUsername(name)) => {
            println!("Admin '{name}' already exists.");
            Ok(())
        }
        Err(AuthError::Validation(errors)) => {
            for (field, messages) in errors.iter() {
                for message in messages {
                    println!("  {field}: {message}");
                }
            }
            anyhow::bail!("Invalid admin details")
        }
        Err(e) => Err(e.into()),
    }
}
