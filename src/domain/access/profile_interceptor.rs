//! Profile completion interceptor.
//!
//! Runs on every navigation event for the whole routed tree. It never
//! blocks rendering; it only answers "proceed" or "go to the completion form
//! first". Calling it repeatedly with the same inputs yields the same
//! answer, so the routing layer can invoke it as often as it likes.

use crate::domain::foundation::SessionSnapshot;

use super::decision::{InterceptDecision, Redirect};
use super::paths::{COMPLETE_PROFILE_PATH, PROFILE_EXEMPT_ROUTES};

/// Navigation watcher enforcing one-time profile completion.
#[derive(Debug, Clone)]
pub struct ProfileInterceptor {
    exempt: &'static [&'static str],
}

impl ProfileInterceptor {
    pub fn new() -> Self {
        Self {
            exempt: &PROFILE_EXEMPT_ROUTES,
        }
    }

    /// Paths this interceptor never redirects away from.
    pub fn exempt_routes(&self) -> &'static [&'static str] {
        self.exempt
    }

    pub fn evaluate(&self, session: &SessionSnapshot, current_path: &str) -> InterceptDecision {
        if session.is_loading {
            return InterceptDecision::Proceed;
        }

        if session.is_authenticated
            && session.has_incomplete_profile()
            && !self.exempt.contains(&current_path)
        {
            tracing::debug!(
                path = current_path,
                "Intercepting navigation for profile completion"
            );
            return InterceptDecision::Redirect(Redirect::replace(COMPLETE_PROFILE_PATH));
        }

        InterceptDecision::Proceed
    }
}

impl Default for ProfileInterceptor {
    fn default() -> Self {
        Self::new()
    }
}
