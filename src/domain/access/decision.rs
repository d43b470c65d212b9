//! Outcomes produced by the gates.

use serde::Serialize;

/// How a redirect touches the browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Overwrite the current history entry. Back does not return to the
    /// gated page.
    Replace,
    /// Push a new history entry.
    Push,
}

/// A navigation the routing layer must perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub target: String,
    pub mode: NavigationMode,
}

impl Redirect {
    /// A history-replacing redirect.
    pub fn replace(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            mode: NavigationMode::Replace,
        }
    }

    pub fn replaces_history(&self) -> bool {
        self.mode == NavigationMode::Replace
    }
}

/// What a render-blocking gate decided for the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Session still resolving; show a neutral indicator, decide nothing.
    Loading,
    /// Leave this view.
    Redirect(Redirect),
    /// Signed in but lacking a required role. Shown inline, never redirected.
    AccessDenied,
    /// Show the wrapped content.
    Render,
}

impl GateOutcome {
    pub fn is_redirect(&self) -> bool {
        matches!(self, GateOutcome::Redirect(_))
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GateOutcome::Redirect(redirect) => Some(&redirect.target),
            _ => None,
        }
    }

    /// Stable snake_case name, used in logs and on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            GateOutcome::Loading => "loading",
            GateOutcome::Redirect(_) => "redirect",
            GateOutcome::AccessDenied => "access_denied",
            GateOutcome::Render => "render",
        }
    }
}

/// Result of the profile completion interceptor for one navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptDecision {
    /// Let the navigation continue untouched.
    Proceed,
    /// Force the user elsewhere first.
    Redirect(Redirect),
}
