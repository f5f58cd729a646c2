//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::{AdminInfo, Credentials, Principal};
use crate::services::auth_service::{AuthError, AuthService};
use async_trait::async_trait;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

fn record_attempt(action: &'static str, outcome: &'static str) {
    metrics::counter!("auth_attempts_total", "action" => action, "outcome" => outcome)
        .increment(1);
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<Principal, AuthError> {
        credentials.validate_login()?;

        let admin = self
            .store
            .verify_admin_password(
                &credentials.username,
                &credentials.password,
                &self.security,
            )
            .await?;

        let Some(admin) = admin else {
            record_attempt("login", "failure");
            tracing::info!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        record_attempt("login", "success");
        tracing::info!(username = %admin.username, "Admin logged in");

        Ok(Principal {
            admin_id: admin.id,
            username: admin.username,
        })
    }

    async fn register(&self, credentials: &Credentials) -> Result<AdminInfo, AuthError> {
        credentials.validate_registration(self.security.min_password_length)?;

        // Friendlier error first; the unique index still decides under a race.
        if self.store.admin_exists(&credentials.username).await? {
            record_attempt("register", "duplicate");
            return Err(AuthError::DuplicateUsername(credentials.username.clone()));
        }

        let created = self
            .store
            .create_admin(&credentials.username, &credentials.password, &self.security)
            .await?;

        let Some(admin) = created else {
            record_attempt("register", "duplicate");
            return Err(AuthError::DuplicateUsername(credentials.username.clone()));
        };

        record_attempt("register", "success");
        tracing::info!(username = %admin.username, "Admin registered");
        Ok(admin)
    }
}
