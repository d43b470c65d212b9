//! ProfileReader backed by the hosted backend's REST interface.
//!
//! Reads a single row from the `profiles` table:
//!
//! ```text
//! GET {base_url}/rest/v1/profiles?id=eq.{user_id}&select=roles,profile_completed
//! apikey: {anon_key}
//! Authorization: Bearer {access_token}
//! ```
//!
//! The bearer is the user's token, so row-level policies scoped to the
//! row owner still return the caller's own profile.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{ProfileReader, ProfileRecord};

const PROFILE_COLUMNS: &str = "roles,profile_completed";

/// Connection settings for the hosted backend.
#[derive(Clone)]
pub struct RestProfileConfig {
    pub base_url: String,
    pub anon_key: SecretString,
    pub timeout: Duration,
}

impl RestProfileConfig {
    pub fn new(base_url: impl Into<String>, anon_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn profiles_url(&self) -> String {
        format!("{}/rest/v1/profiles", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for RestProfileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestProfileConfig")
            .field("base_url", &self.base_url)
            .field("anon_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// REST implementation of ProfileReader
pub struct RestProfileReader {
    config: RestProfileConfig,
    http_client: reqwest::Client,
}

impl RestProfileReader {
    pub fn new(config: RestProfileConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn unavailable(message: String) -> DomainError {
        tracing::error!("{}", message);
        DomainError::new(ErrorCode::ExternalServiceError, message)
    }
}

#[async_trait]
impl ProfileReader for RestProfileReader {
    async fn find_profile(
        &self,
        user_id: &UserId,
        access_token: &str,
    ) -> Result<Option<ProfileRecord>, DomainError> {
        let url = self.config.profiles_url();
        let anon_key = self.config.anon_key.expose_secret();

        tracing::debug!(user_id = %user_id, "Fetching profile row");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("id", format!("eq.{}", user_id)),
                ("select", PROFILE_COLUMNS.to_string()),
            ])
            .header("apikey", anon_key.as_str())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Self::unavailable(format!("Profile request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(
                Self::unavailable(format!("Profile endpoint returned {}", status))
                    .with_detail("status", status.as_u16().to_string()),
            );
        }

        let rows: Vec<ProfileRecord> = response
            .json()
            .await
            .map_err(|e| Self::unavailable(format!("Failed to parse profile rows: {}", e)))?;

        Ok(rows.into_iter().next())
    }
}

impl std::fmt::Debug for RestProfileReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestProfileReader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
