//! Live navigation gating.

mod controller;

pub use controller::{MountedView, NavigationController};
