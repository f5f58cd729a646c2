use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub security: SecurityConfig,

    pub catalog: CatalogConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// "pretty" for human-readable output, "json" for one object per line
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/cinedex.db".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub bind_address: String,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    /// Enable when the server sits behind TLS; browsers drop Secure cookies
    /// received over plain HTTP.
    pub secure_cookies: bool,

    /// Sessions expire after this many minutes without a request.
    pub session_ttl_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5080,
            bind_address: "0.0.0.0".to_string(),
            cors_allowed_origins: vec![
                "http://localhost:5080".to_string(),
                "http://127.0.0.1:5080".to_string(),
            ],
            secure_cookies: false,
            session_ttl_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    pub argon2_parallelism: u32,

    pub min_password_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
            min_password_length: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Seed the sample genres and movies into an empty database.
    pub seed_sample_data: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            security: SecurityConfig::default(),
            catalog: CatalogConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("CINEDEX_DATABASE_PATH") {
            self.general.database_path = path;
        }

        if let Some(port) = std::env::var("CINEDEX_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.server.port = port;
        }

        if let Ok(level) = std::env::var("CINEDEX_LOG_LEVEL") {
            self.general.log_level = level;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cinedex").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cinedex").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "min_db_connections ({}) cannot exceed max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        if !matches!(self.general.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "Unknown log format '{}', expected \"pretty\" or \"json\"",
                self.general.log_format
            );
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.server.session_ttl_minutes <= 0 {
            anyhow::bail!("Session TTL must be > 0 minutes");
        }

        if self.security.min_password_length == 0 {
            anyhow::bail!("Minimum password length must be > 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.session_ttl_minutes, 60);
        assert_eq!(config.security.min_password_length, 6);
        assert!(!config.server.secure_cookies);
        assert!(config.catalog.seed_sample_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[catalog]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [server]
            port = 8081
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.server.port, 8081);

        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.security.argon2_time_cost, 3);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.general.log_format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.min_db_connections = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.security.min_password_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("cinedex-config-{}.toml", uuid::Uuid::new_v4()));

        let mut config = Config::default();
        config.server.port = 9090;
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.server.port, 9090);

        std::fs::remove_file(&path).ok();
    }
}
