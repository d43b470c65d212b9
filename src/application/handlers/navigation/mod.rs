//! Navigation query handlers.

mod evaluate_navigation;

pub use evaluate_navigation::{
    EvaluateNavigationHandler, EvaluateNavigationQuery, EvaluateNavigationResult,
};
