//! Route guard for protected views.
//!
//! Wraps a single protected view. Given the session snapshot and the path
//! being visited, it picks exactly one outcome, checking in this order:
//!
//! ```text
//! loading?            -> Loading              (no navigation decision)
//! not authenticated?  -> Redirect(/login)     (replace)
//! profile incomplete? -> Redirect(/complete-profile) (replace, unless already there)
//! role-gated, no hit? -> AccessDenied         (no redirect)
//! otherwise           -> Render
//! ```

use crate::domain::foundation::{AllowedRoles, SessionSnapshot};

use super::decision::{GateOutcome, Redirect};
use super::paths::{COMPLETE_PROFILE_PATH, LOGIN_PATH};

/// Per-route guard options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOptions {
    /// Roles allowed in. `None` or empty means any authenticated user.
    pub allowed_roles: Option<AllowedRoles>,

    /// Whether an incomplete profile is sent to the completion form.
    pub require_complete_profile: bool,
}

impl GuardOptions {
    /// Restricts the route to the given roles.
    pub fn with_roles(allowed_roles: AllowedRoles) -> Self {
        Self {
            allowed_roles: Some(allowed_roles),
            ..Self::default()
        }
    }

    /// Lets users with an incomplete profile through.
    pub fn allow_incomplete_profile(mut self) -> Self {
        self.require_complete_profile = false;
        self
    }
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            allowed_roles: None,
            require_complete_profile: true,
        }
    }
}

/// Render-blocking gate around one protected view.
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    options: GuardOptions,
}

impl RouteGuard {
    pub fn new(options: GuardOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GuardOptions {
        &self.options
    }

    /// Decides what the wrapped view shows for this snapshot.
    pub fn evaluate(&self, session: &SessionSnapshot, current_path: &str) -> GateOutcome {
        if session.is_loading {
            return GateOutcome::Loading;
        }

        if !session.is_authenticated {
            tracing::debug!(path = current_path, "Unauthenticated visit to protected route");
            return GateOutcome::Redirect(Redirect::replace(LOGIN_PATH));
        }

        if self.options.require_complete_profile
            && session.has_incomplete_profile()
            && current_path != COMPLETE_PROFILE_PATH
        {
            tracing::debug!(path = current_path, "Profile incomplete, sending to completion form");
            return GateOutcome::Redirect(Redirect::replace(COMPLETE_PROFILE_PATH));
        }

        if let Some(allowed) = self.options.allowed_roles.as_ref().filter(|a| !a.is_empty()) {
            let held = session.roles();
            if !allowed.permits(&held) {
                tracing::info!(
                    path = current_path,
                    user_id = session.user.as_ref().map(|u| u.id.as_str()),
                    "Access denied: no allowed role"
                );
                return GateOutcome::AccessDenied;
            }
        }

        GateOutcome::Render
    }
}
