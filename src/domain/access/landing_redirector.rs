//! Landing redirector for the root path.
//!
//! Anonymous visitors and users still completing their profile see the
//! public home page. Everyone else is sent to exactly one dashboard, picked
//! by a fixed priority so that multi-role users always land in the same
//! place (an admin who also donates lands on `/admin`).

use crate::domain::foundation::{Role, RoleSet, SessionSnapshot};

use super::decision::{GateOutcome, Redirect};

/// Dashboard per role, highest priority first.
pub const LANDING_PRIORITY: [(Role, &str); 5] = [
    (Role::Admin, "/admin"),
    (Role::Director, "/director"),
    (Role::DirectorSede, "/director-sede"),
    (Role::Entrenador, "/profile"),
    (Role::Donator, "/donator"),
];

/// Returns the dashboard for the highest-priority role held, if any.
pub fn landing_target(roles: &RoleSet) -> Option<&'static str> {
    LANDING_PRIORITY
        .iter()
        .find(|(role, _)| roles.contains(*role))
        .map(|(_, target)| *target)
}

/// Gate wrapping only the root view.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandingRedirector;

impl LandingRedirector {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, session: &SessionSnapshot) -> GateOutcome {
        if session.is_loading {
            return GateOutcome::Loading;
        }

        if !session.is_fully_onboarded() {
            return GateOutcome::Render;
        }

        match landing_target(&session.roles()) {
            Some(target) => {
                tracing::debug!(destination = target, "Landing redirect");
                GateOutcome::Redirect(Redirect::replace(target))
            }
            None => GateOutcome::Render,
        }
    }
}
