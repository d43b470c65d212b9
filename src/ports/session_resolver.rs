//! Session resolver port.
//!
//! Gives the access layer synchronous read access to the current session and
//! a way to observe changes. Reading never performs I/O; the snapshot is
//! whatever the store holds right now.

use tokio::sync::watch;

use crate::domain::foundation::SessionSnapshot;

/// Source of session snapshots.
pub trait SessionResolver: Send + Sync {
    /// Latest snapshot.
    fn current(&self) -> SessionSnapshot;

    /// Receiver notified on every snapshot change.
    fn subscribe(&self) -> watch::Receiver<SessionSnapshot>;
}
