//! Application layer - Queries, Handlers, and the navigation controller.
//!
//! This layer orchestrates the access gates and coordinates between ports.

pub mod handlers;
pub mod navigation;

pub use handlers::{
    EvaluateNavigationHandler, EvaluateNavigationQuery, EvaluateNavigationResult,
};
pub use navigation::{MountedView, NavigationController};
