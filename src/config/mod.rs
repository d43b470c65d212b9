//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PORTAL_ACCESS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use portal_access::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod auth;
mod error;
mod features;
mod server;

pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::ServerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, logging, and CORS settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted auth/backend configuration
    pub auth: AuthConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PORTAL_ACCESS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PORTAL_ACCESS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PORTAL_ACCESS__AUTH__BACKEND_URL=...` -> `auth.backend_url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PORTAL_ACCESS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate(self.is_production())?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("PORTAL_ACCESS__AUTH__BACKEND_URL", "https://db.example.org");
        env::set_var("PORTAL_ACCESS__AUTH__ANON_KEY", "anon-key");
        env::set_var("PORTAL_ACCESS__AUTH__JWT_SECRET", "jwt-secret");
    }

    fn clear_env() {
        env::remove_var("PORTAL_ACCESS__AUTH__BACKEND_URL");
        env::remove_var("PORTAL_ACCESS__AUTH__ANON_KEY");
        env::remove_var("PORTAL_ACCESS__AUTH__JWT_SECRET");
        env::remove_var("PORTAL_ACCESS__SERVER__PORT");
        env::remove_var("PORTAL_ACCESS__SERVER__PRODUCTION");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.auth.backend_url, "https://db.example.org");
        assert_eq!(config.auth.jwt_secret.expose_secret(), "jwt-secret");
        assert_eq!(config.auth.jwt_audience, "authenticated");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.socket_addr().to_string(), "0.0.0.0:8080");
        assert!(!config.is_production());
        assert!(config.features.enable_tracing);
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PORTAL_ACCESS__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 3000);
    }

    #[test]
    fn test_production_requires_https_backend() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("PORTAL_ACCESS__AUTH__BACKEND_URL", "http://localhost:54321");
        env::set_var("PORTAL_ACCESS__SERVER__PRODUCTION", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::BackendMustBeHttps));
    }

    #[test]
    fn test_missing_auth_section_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
