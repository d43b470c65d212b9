//! Navigation controller.
//!
//! Binds the gate pipeline to a live session and the routing primitive.
//! `on_navigation` handles a single navigation event; `mount` keeps a view
//! gated while the session changes underneath it.
//!
//! ```text
//! SessionResolver ──watch──▶ watcher task ──▶ NavigationGate ──▶ Navigator
//!                                 │
//!                                 └──▶ MountedView::outcome()
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::access::{GateOutcome, NavigationGate, Redirect};
use crate::ports::{Navigator, SessionResolver};

/// Drives navigations from gate decisions.
#[derive(Clone)]
pub struct NavigationController {
    gate: Arc<NavigationGate>,
    resolver: Arc<dyn SessionResolver>,
    navigator: Arc<dyn Navigator>,
}

impl NavigationController {
    pub fn new(
        gate: Arc<NavigationGate>,
        resolver: Arc<dyn SessionResolver>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            gate,
            resolver,
            navigator,
        }
    }

    /// Evaluates `location` against the current session, navigating if the
    /// gates redirect.
    pub fn on_navigation(&self, location: &str) -> GateOutcome {
        let outcome = self.gate.evaluate(&self.resolver.current(), location);
        if let GateOutcome::Redirect(redirect) = &outcome {
            self.navigator.navigate(&redirect.target, redirect.mode);
        }
        outcome
    }

    /// Mounts a gated view at `location`.
    ///
    /// The view re-evaluates on every session change. It issues at most one
    /// navigation, after which it stops watching. Once the returned handle
    /// is dropped the watcher never navigates, even if it is already running
    /// when the drop happens.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&self, location: &str) -> MountedView {
        let initial = self.gate.evaluate(&self.resolver.current(), location);
        let (outcome_tx, outcome_rx) = watch::channel(initial);

        let gate = Arc::clone(&self.gate);
        let navigator = Arc::clone(&self.navigator);
        let mut sessions = self.resolver.subscribe();
        let location = location.to_string();
        let mounted = Arc::new(Mutex::new(true));
        let still_mounted = Arc::clone(&mounted);

        let task = tokio::spawn(async move {
            loop {
                let snapshot = sessions.borrow_and_update().clone();
                let outcome = gate.evaluate(&snapshot, &location);
                outcome_tx.send_replace(outcome.clone());

                if let GateOutcome::Redirect(redirect) = outcome {
                    navigate_if_mounted(navigator.as_ref(), &still_mounted, &redirect);
                    break;
                }

                if sessions.changed().await.is_err() {
                    break;
                }
            }
            tracing::trace!(location = %location, "View watcher finished");
        });

        MountedView {
            outcome: outcome_rx,
            mounted,
            task,
        }
    }
}

/// Navigates unless the view was unmounted. The flag stays locked for the
/// whole navigation so an unmount either precedes it or waits for it.
fn navigate_if_mounted(
    navigator: &dyn Navigator,
    mounted: &Mutex<bool>,
    redirect: &Redirect,
) -> bool {
    let mounted = mounted.lock().unwrap_or_else(PoisonError::into_inner);
    if !*mounted {
        tracing::debug!(target_path = %redirect.target, "View unmounted, skipping navigation");
        return false;
    }
    navigator.navigate(&redirect.target, redirect.mode);
    true
}

impl std::fmt::Debug for NavigationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationController")
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

/// A mounted, gated view. Unmounts on drop.
#[derive(Debug)]
pub struct MountedView {
    outcome: watch::Receiver<GateOutcome>,
    mounted: Arc<Mutex<bool>>,
    task: JoinHandle<()>,
}

impl MountedView {
    /// What the view currently shows.
    pub fn outcome(&self) -> GateOutcome {
        self.outcome.borrow().clone()
    }

    /// Waits until the view shows something other than the loading indicator.
    pub async fn settled(&mut self) -> GateOutcome {
        if let Ok(outcome) = self
            .outcome
            .wait_for(|outcome| *outcome != GateOutcome::Loading)
            .await
        {
            return outcome.clone();
        }
        self.outcome.borrow().clone()
    }

    /// True once the watcher has stopped.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        *self.mounted.lock().unwrap_or_else(PoisonError::into_inner) = false;
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionLoader;
    use crate::adapters::navigation::RecordingNavigator;
    use crate::adapters::session::SessionStore;
    use crate::domain::access::NavigationMode;
    use std::time::Duration;

    struct Fixture {
        store: Arc<SessionStore>,
        navigator: Arc<RecordingNavigator>,
        controller: NavigationController,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(SessionStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let controller = NavigationController::new(
            Arc::new(NavigationGate::portal()),
            store.clone(),
            navigator.clone(),
        );
        Fixture {
            store,
            navigator,
            controller,
        }
    }

    fn loader() -> MockSessionLoader {
        MockSessionLoader::new()
            .with_test_user("admin", "user-1", &["admin"], true)
            .with_test_user("donator", "user-2", &["donator"], true)
            .with_test_user("incomplete", "user-3", &["donator"], false)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // on_navigation
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn on_navigation_while_loading_does_not_navigate() {
        let f = fixture();
        assert_eq!(f.controller.on_navigation("/admin"), GateOutcome::Loading);
        assert_eq!(f.navigator.count(), 0);
    }

    #[tokio::test]
    async fn on_navigation_redirects_anonymous_to_login() {
        let f = fixture();
        f.store.resolve_with(&loader(), None).await;

        f.controller.on_navigation("/donator");

        assert_eq!(f.navigator.last().unwrap().target, "/login");
        assert_eq!(f.navigator.last().unwrap().mode, NavigationMode::Replace);
    }

    #[tokio::test]
    async fn on_navigation_intercepts_incomplete_profile() {
        let f = fixture();
        f.store.resolve_with(&loader(), Some("incomplete")).await;

        f.controller.on_navigation("/proyectos");

        assert_eq!(f.navigator.last().unwrap().target, "/complete-profile");
    }

    #[tokio::test]
    async fn on_navigation_render_does_not_navigate() {
        let f = fixture();
        f.store.resolve_with(&loader(), Some("donator")).await;

        assert_eq!(f.controller.on_navigation("/donator"), GateOutcome::Render);
        assert_eq!(f.navigator.count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // mount
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test(start_paused = true)]
    async fn slow_resolution_navigates_once_after_loading() {
        let f = fixture();
        let slow = loader().with_delay(Duration::from_secs(2));

        let mut view = f.controller.mount("/admin");
        assert_eq!(view.outcome(), GateOutcome::Loading);

        let store = f.store.clone();
        let resolving =
            tokio::spawn(async move { store.resolve_with(&slow, Some("expired-token")).await });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(f.navigator.count(), 0);
        assert_eq!(view.outcome(), GateOutcome::Loading);

        resolving.await.unwrap();
        let settled = view.settled().await;

        assert_eq!(settled, GateOutcome::Redirect(Redirect::replace("/login")));
        tokio::task::yield_now().await;
        assert_eq!(f.navigator.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_view_mid_load_never_navigates() {
        let f = fixture();
        let slow = loader().with_delay(Duration::from_secs(2));

        let view = f.controller.mount("/admin");
        drop(view);

        f.store.resolve_with(&slow, None).await;
        tokio::task::yield_now().await;

        assert_eq!(f.navigator.count(), 0);
    }

    #[test]
    fn unmounted_flag_suppresses_navigation() {
        let navigator = RecordingNavigator::new();
        let redirect = Redirect::replace("/login");

        assert!(!navigate_if_mounted(&navigator, &Mutex::new(false), &redirect));
        assert_eq!(navigator.count(), 0);

        assert!(navigate_if_mounted(&navigator, &Mutex::new(true), &redirect));
        assert_eq!(navigator.count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn no_navigation_after_drop_returns_while_watcher_runs() {
        for _ in 0..50 {
            let f = fixture();
            let view = f.controller.mount("/admin");

            let store = f.store.clone();
            let resolving = tokio::spawn(async move { store.resolve_with(&loader(), None).await });
            tokio::task::yield_now().await;

            drop(view);
            let after_drop = f.navigator.count();

            resolving.await.unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
            assert_eq!(f.navigator.count(), after_drop);
        }
    }

    #[tokio::test]
    async fn mounted_view_renders_for_permitted_role() {
        let f = fixture();
        let mut view = f.controller.mount("/director");

        f.store.resolve_with(&loader(), Some("admin")).await;

        assert_eq!(view.settled().await, GateOutcome::Render);
        assert_eq!(f.navigator.count(), 0);
    }

    #[tokio::test]
    async fn mounted_view_denies_wrong_role_without_navigating() {
        let f = fixture();
        let mut view = f.controller.mount("/admin");

        f.store.resolve_with(&loader(), Some("donator")).await;

        assert_eq!(view.settled().await, GateOutcome::AccessDenied);
        assert_eq!(f.navigator.count(), 0);
    }

    #[tokio::test]
    async fn sign_out_while_mounted_redirects_to_login() {
        let f = fixture();
        f.store.resolve_with(&loader(), Some("admin")).await;
        let view = f.controller.mount("/admin");
        assert_eq!(view.outcome(), GateOutcome::Render);

        f.store.sign_out();

        for _ in 0..10 {
            if f.navigator.count() > 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(f.navigator.last().unwrap().target, "/login");
    }

    #[tokio::test]
    async fn watcher_stops_after_its_navigation() {
        let f = fixture();
        f.store.resolve_with(&loader(), None).await;
        let view = f.controller.mount("/admin");

        for _ in 0..10 {
            if view.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(view.is_finished());

        f.store.sign_out();
        tokio::task::yield_now().await;
        assert_eq!(f.navigator.count(), 1);
    }
}
