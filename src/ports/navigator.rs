//! Navigator port - the routing primitive the gates drive.

use crate::domain::access::NavigationMode;

/// Performs a client-side navigation.
///
/// `NavigationMode::Replace` must overwrite the current history entry so
/// the guarded page is not reachable with "back".
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str, mode: NavigationMode);
}
