//! JWT session loader for the hosted auth service.
//!
//! The hosted service signs access tokens with a shared HS256 secret. This
//! adapter:
//!
//! 1. Validates signature, audience, and expiry
//! 2. Takes the user id from the `sub` claim
//! 3. Reads the profile row through the `ProfileReader` port
//! 4. Normalises role strings into a `RoleSet`
//!
//! # Example
//!
//! ```ignore
//! let loader = JwtSessionLoader::new(
//!     JwtConfig::new(secret, "authenticated"),
//!     Arc::new(RestProfileReader::new(rest_config)?),
//! );
//! let user = loader.load("eyJ...").await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, RoleSet, UserId, UserProfile};
use crate::ports::{ProfileReader, SessionLoader};

/// Configuration for HS256 token validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared signing secret.
    pub secret: SecretString,

    /// Expected `aud` claim.
    pub audience: String,
}

impl JwtConfig {
    pub fn new(secret: SecretString, audience: impl Into<String>) -> Self {
        Self {
            secret,
            audience: audience.into(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("audience", &self.audience)
            .finish()
    }
}

/// Claims carried by the hosted service's access tokens.
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    /// Subject - the user ID
    sub: String,

    /// Expiry timestamp (Unix epoch seconds)
    exp: i64,

    #[serde(default)]
    aud: Option<String>,
}

/// Production implementation of `SessionLoader`.
pub struct JwtSessionLoader {
    config: JwtConfig,
    profiles: Arc<dyn ProfileReader>,
}

impl JwtSessionLoader {
    pub fn new(config: JwtConfig, profiles: Arc<dyn ProfileReader>) -> Self {
        Self { config, profiles }
    }

    fn validate_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        let key = DecodingKey::from_secret(self.config.secret.expose_secret().as_bytes());

        decode::<AccessClaims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })
    }
}

#[async_trait]
impl SessionLoader for JwtSessionLoader {
    async fn load(&self, access_token: &str) -> Result<Option<UserProfile>, AuthError> {
        let claims = self.validate_token(access_token)?;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        let record = self
            .profiles
            .find_profile(&user_id, access_token)
            .await
            .map_err(|e| AuthError::service_unavailable(e.message))?;

        let Some(record) = record else {
            tracing::info!(user_id = %user_id, "Authenticated user has no profile row");
            return Ok(None);
        };

        Ok(Some(UserProfile::new(
            user_id,
            RoleSet::from_raw(&record.roles),
            record.has_completed_profile,
        )))
    }
}

impl std::fmt::Debug for JwtSessionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionLoader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
