//! Application handlers.
//!
//! Query handlers that orchestrate the access gates.

pub mod navigation;

pub use navigation::{
    EvaluateNavigationHandler, EvaluateNavigationQuery, EvaluateNavigationResult,
};
