//! HTTP middleware for axum.
//!
//! This module contains middleware layers for cross-cutting concerns:
//!
//! - `session` - Session resolution middleware and extractor
//! - `guard` - Route guard enforcement for API routes

pub mod guard;
pub mod session;

pub use guard::{guard_routes, route_guard_middleware, GuardRejection};
pub use session::{bearer_token, session_middleware, CurrentSession, SessionState};
