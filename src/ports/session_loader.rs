//! Session loading port.
//!
//! Turns a raw access token into the user the access layer reasons about.
//! Implementations talk to the hosted auth service and the profile table;
//! the gates never see either.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, UserProfile};

/// Resolves an access token into the signed-in user.
///
/// # Contract
///
/// - `Ok(Some(user))` - token valid and profile row found
/// - `Ok(None)` - token valid but no profile row exists yet
/// - `Err(AuthError::InvalidToken | AuthError::TokenExpired)` - sign in again
/// - `Err(AuthError::ServiceUnavailable)` - transient failure
///
/// Role strings must be normalised before they reach `UserProfile`.
#[async_trait]
pub trait SessionLoader: Send + Sync {
    async fn load(&self, access_token: &str) -> Result<Option<UserProfile>, AuthError>;
}
