//! EvaluateNavigationHandler - Query handler for gating one navigation.

use std::sync::Arc;

use crate::domain::access::{route_path, GateOutcome, NavigationGate, ROOT_PATH};
use crate::domain::foundation::SessionSnapshot;

/// Query to evaluate a navigation for a session.
#[derive(Debug, Clone)]
pub struct EvaluateNavigationQuery {
    pub session: SessionSnapshot,
    /// Requested location; query string and fragment are ignored.
    pub location: String,
}

/// Result of a navigation evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateNavigationResult {
    /// The path that was gated.
    pub path: String,
    pub outcome: GateOutcome,
}

/// Handler for evaluating navigations.
///
/// Pure decision; the caller performs any redirect.
pub struct EvaluateNavigationHandler {
    gate: Arc<NavigationGate>,
}

impl EvaluateNavigationHandler {
    pub fn new(gate: Arc<NavigationGate>) -> Self {
        Self { gate }
    }

    pub fn handle(&self, query: EvaluateNavigationQuery) -> EvaluateNavigationResult {
        let path = route_path(&query.location).to_string();
        let outcome = self.gate.evaluate(&query.session, &path);

        tracing::debug!(path = %path, outcome = outcome.kind(), "Navigation evaluated");

        EvaluateNavigationResult { path, outcome }
    }

    /// Evaluates the root path, where the landing redirector applies.
    pub fn landing(&self, session: SessionSnapshot) -> EvaluateNavigationResult {
        self.handle(EvaluateNavigationQuery {
            session,
            location: ROOT_PATH.to_string(),
        })
    }
}
