//! Authentication types for the domain layer.
//!
//! These types describe what the gates are allowed to know about the current
//! visitor. They have **no external dependencies** - the hosted auth service,
//! a mock, or a client-side store can all populate them through the
//! `SessionResolver` and `SessionLoader` ports.
//!
//! # Design Decisions
//!
//! - `SessionSnapshot` is an immutable value; gates never mutate it
//! - `is_authenticated` is independent of profile completion
//! - An authenticated snapshot may lack a `UserProfile` while the profile row
//!   is still unresolved

use serde::Serialize;
use thiserror::Error;

use super::{RoleSet, UserId};

/// A signed-in user as seen by the access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// Identifier issued by the auth service.
    pub id: UserId,

    /// Roles normalised at the session boundary.
    pub roles: RoleSet,

    /// False until the one-time profile completion step succeeds.
    pub has_completed_profile: bool,
}

impl UserProfile {
    pub fn new(id: UserId, roles: RoleSet, has_completed_profile: bool) -> Self {
        Self {
            id,
            roles,
            has_completed_profile,
        }
    }

    /// Returns a copy with the profile marked complete.
    pub fn completed(mut self) -> Self {
        self.has_completed_profile = true;
        self
    }
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// True only during the initial resolution window.
    pub is_loading: bool,

    /// Whether the visitor holds a valid session.
    pub is_authenticated: bool,

    /// The user's profile, if resolved.
    pub user: Option<UserProfile>,
}

impl SessionSnapshot {
    /// Session resolution is still in flight.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            is_authenticated: false,
            user: None,
        }
    }

    /// Resolved, no session.
    pub fn anonymous() -> Self {
        Self {
            is_loading: false,
            is_authenticated: false,
            user: None,
        }
    }

    /// Resolved, signed in with a known profile.
    pub fn authenticated(user: UserProfile) -> Self {
        Self {
            is_loading: false,
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// Resolved, signed in, but the profile row has not been found.
    pub fn authenticated_without_profile() -> Self {
        Self {
            is_loading: false,
            is_authenticated: true,
            user: None,
        }
    }

    /// Snapshot for a finished session load.
    ///
    /// Load failures surface as an anonymous session; the access layer never
    /// retries on its own.
    pub fn resolved(result: Result<Option<UserProfile>, AuthError>) -> Self {
        match result {
            Ok(Some(user)) => Self::authenticated(user),
            Ok(None) => Self::authenticated_without_profile(),
            Err(e) => {
                if e.requires_reauthentication() {
                    tracing::debug!(error = %e, "Session rejected");
                } else {
                    tracing::warn!(error = %e, "Session resolution failed");
                }
                Self::anonymous()
            }
        }
    }

    /// Roles of the current user; empty when no user is resolved.
    pub fn roles(&self) -> RoleSet {
        self.user
            .as_ref()
            .map(|user| user.roles.clone())
            .unwrap_or_default()
    }

    /// True when a resolved user is known to have an incomplete profile.
    ///
    /// A missing user is *not* reported as incomplete: nothing is known about
    /// a profile that has not been resolved.
    pub fn has_incomplete_profile(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| !user.has_completed_profile)
    }

    /// True when signed in with a completed profile.
    pub fn is_fully_onboarded(&self) -> bool {
        self.is_authenticated
            && self
                .user
                .as_ref()
                .is_some_and(|user| user.has_completed_profile)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::loading()
    }
}

/// Authentication errors that can occur while resolving a session.
///
/// These errors are **domain-centric** - they describe what went wrong
/// from the portal's perspective, not the auth provider's.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Role;

    fn test_user(complete: bool) -> UserProfile {
        UserProfile::new(
            UserId::new("user-123").unwrap(),
            RoleSet::from_raw(["donator"]),
            complete,
        )
    }

    #[test]
    fn loading_snapshot_is_not_authenticated() {
        let snapshot = SessionSnapshot::loading();
        assert!(snapshot.is_loading);
        assert!(!snapshot.is_authenticated);
        assert!(snapshot.user.is_none());
    }

    #[test]
    fn default_snapshot_is_loading() {
        assert_eq!(SessionSnapshot::default(), SessionSnapshot::loading());
    }

    #[test]
    fn resolved_maps_load_results() {
        assert_eq!(
            SessionSnapshot::resolved(Ok(Some(test_user(true)))),
            SessionSnapshot::authenticated(test_user(true))
        );
        assert_eq!(
            SessionSnapshot::resolved(Ok(None)),
            SessionSnapshot::authenticated_without_profile()
        );
        assert_eq!(
            SessionSnapshot::resolved(Err(AuthError::service_unavailable("down"))),
            SessionSnapshot::anonymous()
        );
    }

    #[test]
    fn roles_empty_without_user() {
        assert!(SessionSnapshot::authenticated_without_profile()
            .roles()
            .is_empty());
    }

    #[test]
    fn roles_come_from_user() {
        let snapshot = SessionSnapshot::authenticated(test_user(true));
        assert!(snapshot.roles().contains(Role::Donator));
    }

    #[test]
    fn incomplete_profile_requires_a_user() {
        assert!(SessionSnapshot::authenticated(test_user(false)).has_incomplete_profile());
        assert!(!SessionSnapshot::authenticated(test_user(true)).has_incomplete_profile());
        assert!(!SessionSnapshot::authenticated_without_profile().has_incomplete_profile());
    }

    #[test]
    fn fully_onboarded_requires_complete_profile() {
        assert!(SessionSnapshot::authenticated(test_user(true)).is_fully_onboarded());
        assert!(!SessionSnapshot::authenticated(test_user(false)).is_fully_onboarded());
        assert!(!SessionSnapshot::anonymous().is_fully_onboarded());
    }

    #[test]
    fn completed_marks_profile_complete() {
        assert!(test_user(false).completed().has_completed_profile);
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::service_unavailable("timeout").requires_reauthentication());
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("Connection refused");
        assert_eq!(format!("{}", err), "Auth service unavailable: Connection refused");
    }
}
