//! HTTP handlers for navigation and session endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};

use crate::adapters::http::middleware::CurrentSession;
use crate::application::{EvaluateNavigationHandler, EvaluateNavigationQuery};
use crate::domain::access::NavigationGate;

use super::dto::{EvaluateNavigationRequest, NavigationDecisionResponse, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for navigation endpoints.
#[derive(Clone)]
pub struct NavigationAppState {
    pub gate: Arc<NavigationGate>,
}

impl NavigationAppState {
    pub fn new(gate: Arc<NavigationGate>) -> Self {
        Self { gate }
    }

    pub fn evaluate_navigation_handler(&self) -> EvaluateNavigationHandler {
        EvaluateNavigationHandler::new(self.gate.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/navigation/evaluate
pub async fn evaluate_navigation(
    State(state): State<NavigationAppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<EvaluateNavigationRequest>,
) -> Json<NavigationDecisionResponse> {
    let result = state
        .evaluate_navigation_handler()
        .handle(EvaluateNavigationQuery {
            session,
            location: request.path,
        });
    Json(result.into())
}

/// GET /api/navigation/landing
pub async fn get_landing(
    State(state): State<NavigationAppState>,
    CurrentSession(session): CurrentSession,
) -> Json<NavigationDecisionResponse> {
    Json(state.evaluate_navigation_handler().landing(session).into())
}

/// GET /api/session
pub async fn get_session(CurrentSession(session): CurrentSession) -> Json<SessionResponse> {
    Json(session.into())
}
