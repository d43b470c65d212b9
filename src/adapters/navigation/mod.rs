//! Navigation adapters.

mod recording;

pub use recording::{RecordedNavigation, RecordingNavigator};
