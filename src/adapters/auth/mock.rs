//! Mock session loader for testing.
//!
//! Implements the `SessionLoader` port without a hosted auth service. An
//! optional delay lets tests hold a session in the loading window.
//!
//! # Example
//!
//! ```ignore
//! use portal_access::adapters::auth::MockSessionLoader;
//!
//! let loader = MockSessionLoader::new()
//!     .with_test_user("valid-token", "user-123", &["donator"], true);
//!
//! let user = loader.load("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, RoleSet, UserId, UserProfile};
use crate::ports::SessionLoader;

/// Mock session loader for testing.
///
/// Stores a map of tokens to users. Tokens not in the map return `InvalidToken`.
/// A token mapped to `None` is valid but has no profile row.
#[derive(Debug, Default)]
pub struct MockSessionLoader {
    tokens: RwLock<HashMap<String, Option<UserProfile>>>,
    /// Returned for every load when set
    force_error: RwLock<Option<AuthError>>,
    delay: Option<Duration>,
}

impl MockSessionLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a valid token that resolves to `user`.
    pub fn with_user(self, token: impl Into<String>, user: UserProfile) -> Self {
        self.tokens.write().unwrap().insert(token.into(), Some(user));
        self
    }

    /// Adds a valid token with a user built from raw role strings.
    pub fn with_test_user(
        self,
        token: impl Into<String>,
        user_id: &str,
        roles: &[&str],
        has_completed_profile: bool,
    ) -> Self {
        let user = UserProfile::new(
            UserId::new(user_id).unwrap(),
            RoleSet::from_raw(roles),
            has_completed_profile,
        );
        self.with_user(token, user)
    }

    /// Adds a valid token whose profile row is missing.
    pub fn with_profileless_token(self, token: impl Into<String>) -> Self {
        self.tokens.write().unwrap().insert(token.into(), None);
        self
    }

    /// Forces all loads to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Delays every load, keeping callers in the loading window.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Removes a token, making it invalid.
    pub fn remove_token(&self, token: &str) {
        self.tokens.write().unwrap().remove(token);
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap().len()
    }
}

#[async_trait]
impl SessionLoader for MockSessionLoader {
    async fn load(&self, access_token: &str) -> Result<Option<UserProfile>, AuthError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.force_error.read().unwrap().clone() {
            return Err(error);
        }

        self.tokens
            .read()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
