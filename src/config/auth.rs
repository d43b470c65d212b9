//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Hosted auth/backend service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the hosted backend (REST API and auth)
    pub backend_url: String,

    /// Public anonymous API key sent as `apikey`
    pub anon_key: SecretString,

    /// HS256 secret the backend signs access tokens with
    pub jwt_secret: SecretString,

    /// Expected `aud` claim
    #[serde(default = "default_jwt_audience")]
    pub jwt_audience: String,

    /// Timeout for backend requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the backend URL.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if self.backend_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__BACKEND_URL"));
        }
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(ValidationError::InvalidBackendUrl);
        }
        if self.anon_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ANON_KEY"));
        }
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if production && !self.backend_url.starts_with("https://") {
            return Err(ValidationError::BackendMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            anon_key: SecretString::new(String::new()),
            jwt_secret: SecretString::new(String::new()),
            jwt_audience: default_jwt_audience(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_jwt_audience() -> String {
    "authenticated".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
