//! Session store.
//!
//! Holds the single current `SessionSnapshot` and broadcasts every change
//! over a `tokio::sync::watch` channel. The store starts in the loading
//! state; the loading flag clears exactly once per resolution, whether the
//! load succeeds or fails.

use tokio::sync::watch;

use crate::domain::foundation::SessionSnapshot;
use crate::ports::{SessionLoader, SessionResolver};

/// Observable holder of the current session.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// Creates a store in the loading state.
    pub fn new() -> Self {
        Self::with_snapshot(SessionSnapshot::loading())
    }

    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        let (tx, _rx) = watch::channel(snapshot);
        Self { tx }
    }

    /// Re-enters the loading window, e.g. when a new token arrives.
    pub fn begin_loading(&self) {
        self.tx.send_replace(SessionSnapshot::loading());
    }

    /// Resolves `access_token` and publishes the result.
    ///
    /// A missing token resolves to an anonymous session without calling
    /// the loader. Loader failures also end anonymous.
    pub async fn resolve_with(
        &self,
        loader: &dyn SessionLoader,
        access_token: Option<&str>,
    ) -> SessionSnapshot {
        let snapshot = match access_token {
            Some(token) => SessionSnapshot::resolved(loader.load(token).await),
            None => SessionSnapshot::anonymous(),
        };

        tracing::debug!(
            authenticated = snapshot.is_authenticated,
            has_user = snapshot.user.is_some(),
            "Session resolved"
        );
        self.tx.send_replace(snapshot.clone());
        snapshot
    }

    /// Replaces the snapshot wholesale.
    pub fn publish(&self, snapshot: SessionSnapshot) {
        self.tx.send_replace(snapshot);
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(SessionSnapshot::anonymous());
    }

    /// Marks the current user's profile complete.
    ///
    /// Returns false, and publishes nothing, when there is no user or the
    /// profile is already complete.
    pub fn complete_profile(&self) -> bool {
        self.tx.send_if_modified(|snapshot| match snapshot.user.as_mut() {
            Some(user) if !user.has_completed_profile => {
                user.has_completed_profile = true;
                true
            }
            _ => false,
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionResolver for SessionStore {
    fn current(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionLoader;
    use crate::domain::foundation::AuthError;

    fn loader() -> MockSessionLoader {
        MockSessionLoader::new()
            .with_test_user("complete", "user-1", &["donator"], true)
            .with_test_user("incomplete", "user-2", &["donator"], false)
            .with_profileless_token("profileless")
    }

    #[test]
    fn starts_loading() {
        assert!(SessionStore::new().current().is_loading);
    }

    #[tokio::test]
    async fn resolves_known_token() {
        let store = SessionStore::new();

        let snapshot = store.resolve_with(&loader(), Some("complete")).await;

        assert!(!snapshot.is_loading);
        assert!(snapshot.is_fully_onboarded());
        assert_eq!(store.current(), snapshot);
    }

    #[tokio::test]
    async fn missing_token_is_anonymous() {
        let store = SessionStore::new();
        store.resolve_with(&loader(), None).await;
        assert_eq!(store.current(), SessionSnapshot::anonymous());
    }

    #[tokio::test]
    async fn loader_failure_ends_anonymous_not_loading() {
        let store = SessionStore::new();
        let failing = MockSessionLoader::new().with_error(AuthError::service_unavailable("down"));

        store.resolve_with(&failing, Some("complete")).await;

        assert_eq!(store.current(), SessionSnapshot::anonymous());
    }

    #[tokio::test]
    async fn profileless_token_is_authenticated_without_user() {
        let store = SessionStore::new();
        store.resolve_with(&loader(), Some("profileless")).await;
        assert_eq!(store.current(), SessionSnapshot::authenticated_without_profile());
    }

    #[tokio::test]
    async fn subscribers_see_resolution() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.resolve_with(&loader(), Some("complete")).await;

        rx.changed().await.unwrap();
        assert!(!rx.borrow().is_loading);
    }

    #[tokio::test]
    async fn complete_profile_is_idempotent() {
        let store = SessionStore::new();
        store.resolve_with(&loader(), Some("incomplete")).await;

        assert!(store.complete_profile());
        assert!(store.current().is_fully_onboarded());
        assert!(!store.complete_profile());
    }

    #[test]
    fn complete_profile_without_user_is_noop() {
        let store = SessionStore::with_snapshot(SessionSnapshot::anonymous());
        assert!(!store.complete_profile());
        assert_eq!(store.current(), SessionSnapshot::anonymous());
    }

    #[tokio::test]
    async fn sign_out_and_begin_loading() {
        let store = SessionStore::new();
        store.resolve_with(&loader(), Some("complete")).await;

        store.sign_out();
        assert_eq!(store.current(), SessionSnapshot::anonymous());

        store.begin_loading();
        assert!(store.current().is_loading);
    }
}
