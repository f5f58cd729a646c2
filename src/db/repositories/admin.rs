use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tokio::task;

use crate::config::SecurityConfig;
use crate::db::is_unique_violation;
use crate::entities::{admins, prelude::*};
use crate::models::AdminInfo;

impl From<admins::Model> for AdminInfo {
    fn from(model: admins::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

pub struct AdminRepository {
    conn: DatabaseConnection,
}

impl AdminRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<AdminInfo>> {
        let admin = Admins::find()
            .filter(admins::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query admin by username")?;

        Ok(admin.map(AdminInfo::from))
    }

    pub async fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.get_by_username(username).await?.is_some())
    }

    /// Hashes the password and stores a new admin.
    /// Returns `None` if the username is already taken.
    pub async fn create(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<AdminInfo>> {
        let password = password.to_string();
        let security = security.clone();
        // Argon2 is CPU-bound; keep it off the async workers.
        let password_hash = task::spawn_blocking(move || hash_password(&password, Some(&security)))
            .await
            .context("Password hashing task panicked")??;

        let active = admins::ActiveModel {
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match active.insert(&self.conn).await {
            Ok(model) => Ok(Some(AdminInfo::from(model))),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to insert admin"),
        }
    }

    /// Returns the admin only when the username exists and the password
    /// verifies against the stored hash.
    pub async fn verify_password(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<AdminInfo>> {
        let admin = Admins::find()
            .filter(admins::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .context("Failed to query admin for password verification")?;

        let stored_hash = admin.as_ref().map(|a| a.password_hash.clone());
        let password = password.to_string();
        let security = security.clone();

        let is_valid = task::spawn_blocking(move || {
            check_password(&password, stored_hash.as_deref(), &security)
        })
        .await
        .context("Password verification task panicked")??;

        Ok(admin.filter(|_| is_valid).map(AdminInfo::from))
    }
}

/// Verifies `password` against `stored_hash`. An absent hash still pays for
/// one Argon2 run with the configured params, so unknown usernames answer
/// no faster than wrong passwords.
pub fn check_password(
    password: &str,
    stored_hash: Option<&str>,
    security: &SecurityConfig,
) -> Result<bool> {
    match stored_hash {
        Some(hash) => verify_password(password, hash),
        None => hash_password(password, Some(security)).map(|_| false),
    }
}

/// Hash a password using Argon2id with optional custom params.
/// If config is None, uses the crate's default params.
pub fn hash_password(password: &str, config: Option<&SecurityConfig>) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let argon2 = if let Some(cfg) = config {
        let params = Params::new(
            cfg.argon2_memory_cost_kib,
            cfg.argon2_time_cost,
            cfg.argon2_parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    } else {
        Argon2::default()
    };

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Parameters are read back from the PHC string, so hashes made with
/// older settings still verify.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
