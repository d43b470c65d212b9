//! HTTP adapters - REST API implementations.
//!
//! ```text
//! /health                      liveness, no session
//! /api/*                       session_middleware → navigation routes
//! /api/me                      session_middleware → route guard → session
//! ```

pub mod middleware;
pub mod navigation;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Json, Router};

use crate::domain::access::NavigationGate;

pub use middleware::{guard_routes, session_middleware, CurrentSession, SessionState};
pub use navigation::{navigation_routes, NavigationAppState};

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Builds the full application router.
pub fn app_router(gate: Arc<NavigationGate>, loader: SessionState) -> Router {
    let api = navigation_routes()
        .with_state(NavigationAppState::new(gate))
        .layer(axum_middleware::from_fn_with_state(loader, session_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}
