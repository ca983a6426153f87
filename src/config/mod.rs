//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `COMMENTARY` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use commentary::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod database;
mod email;
mod error;
mod features;
mod server;
mod spam;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{CorsOrigins, Environment, ServerConfig};
pub use spam::SpamConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub spam: SpamConfig,

    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` if present
    /// 2. Reads variables with the `COMMENTARY` prefix
    /// 3. Uses `__` to separate nested values
    ///
    /// - `COMMENTARY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `COMMENTARY__AUTH__ALLOW_NEW_OWNERS=false` -> `auth.allow_new_owners = false`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMMENTARY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.email.validate()?;
        self.spam.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "COMMENTARY__DATABASE__URL",
            "postgresql://commentary@localhost/commentary",
        );
    }

    fn clear_env() {
        env::remove_var("COMMENTARY__DATABASE__URL");
        env::remove_var("COMMENTARY__SERVER__PORT");
        env::remove_var("COMMENTARY__AUTH__ALLOW_NEW_OWNERS");
        env::remove_var("COMMENTARY__EMAIL__SMTP_HOST");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.database.url,
            "postgresql://commentary@localhost/commentary"
        );
        assert!(config.auth.allow_new_owners);
        assert!(!config.email.can_verify());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("COMMENTARY__SERVER__PORT", "3000");
        env::set_var("COMMENTARY__AUTH__ALLOW_NEW_OWNERS", "false");
        env::set_var("COMMENTARY__EMAIL__SMTP_HOST", "smtp.example.com");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(!config.auth.allow_new_owners);
        assert!(config.email.can_verify());
    }

    #[test]
    fn test_missing_database_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
