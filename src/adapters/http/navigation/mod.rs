//! Navigation HTTP adapter.
//!
//! Exposes the gate pipeline to clients that route on their own: they post
//! the path being visited and act on the returned decision.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{
    EvaluateNavigationRequest, NavigationDecisionResponse, SessionResponse, SessionUserResponse,
};
pub use handlers::NavigationAppState;
pub use routes::navigation_routes;
