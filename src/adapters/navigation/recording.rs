//! Navigator that records navigations instead of performing them.
//!
//! Backs headless clients and tests that assert how many navigations the
//! gates issued.

use std::sync::Mutex;

use crate::domain::access::NavigationMode;
use crate::ports::Navigator;

/// A navigation issued through the `Navigator` port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNavigation {
    pub target: String,
    pub mode: NavigationMode,
}

/// Records every navigation in call order.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<RecordedNavigation>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigations(&self) -> Vec<RecordedNavigation> {
        self.history.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.history.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<RecordedNavigation> {
        self.history.lock().unwrap().last().cloned()
    }

    pub fn clear(&self) {
        self.history.lock().unwrap().clear();
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str, mode: NavigationMode) {
        tracing::debug!(target_path = target, ?mode, "Navigating");
        self.history.lock().unwrap().push(RecordedNavigation {
            target: target.to_string(),
            mode,
        });
    }
}
