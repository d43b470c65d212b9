//! HTTP DTOs for navigation and session endpoints.

use serde::{Deserialize, Serialize};

use crate::application::EvaluateNavigationResult;
use crate::domain::access::GateOutcome;
use crate::domain::foundation::{Role, SessionSnapshot};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to evaluate a navigation.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateNavigationRequest {
    /// Location being visited; may include a query string.
    pub path: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Gate decision for one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationDecisionResponse {
    pub path: String,
    /// One of `loading`, `redirect`, `access_denied`, `render`.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Whether the redirect replaces the current history entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace: Option<bool>,
}

impl From<EvaluateNavigationResult> for NavigationDecisionResponse {
    fn from(result: EvaluateNavigationResult) -> Self {
        let outcome = result.outcome.kind().to_string();
        let (target, replace) = match result.outcome {
            GateOutcome::Redirect(redirect) => {
                let replace = redirect.replaces_history();
                (Some(redirect.target), Some(replace))
            }
            _ => (None, None),
        };
        Self {
            path: result.path,
            outcome,
            target,
            replace,
        }
    }
}

/// Signed-in user summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUserResponse {
    pub id: String,
    pub roles: Vec<Role>,
    pub has_completed_profile: bool,
}

/// Current session as seen by the gates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub is_authenticated: bool,
    pub user: Option<SessionUserResponse>,
}

impl From<SessionSnapshot> for SessionResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            is_authenticated: snapshot.is_authenticated,
            user: snapshot.user.map(|user| SessionUserResponse {
                id: user.id.to_string(),
                roles: user.roles.iter().collect(),
                has_completed_profile: user.has_completed_profile,
            }),
        }
    }
}
