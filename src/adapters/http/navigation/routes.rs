//! Axum router configuration for navigation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::guard_routes;
use crate::domain::access::GuardOptions;

use super::handlers::{evaluate_navigation, get_landing, get_session, NavigationAppState};

/// Create the navigation API router.
///
/// # Routes
///
/// - `POST /navigation/evaluate` - Gate decision for a path
/// - `GET /navigation/landing` - Gate decision for the root path
/// - `GET /session` - Current session as the gates see it
///
/// - `GET /me` - The caller's session, behind the route guard
///
/// All routes read the session injected by `session_middleware`. Only `/me`
/// requires authentication; it lets incomplete profiles through so the
/// completion form can load the caller.
pub fn navigation_routes() -> Router<NavigationAppState> {
    let signed_in = guard_routes(
        Router::new().route("/me", get(get_session)),
        GuardOptions::default().allow_incomplete_profile(),
    );

    Router::new()
        .route("/navigation/evaluate", post(evaluate_navigation))
        .route("/navigation/landing", get(get_landing))
        .route("/session", get(get_session))
        .merge(signed_in)
}
