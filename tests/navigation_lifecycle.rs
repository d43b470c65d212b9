//! End-to-end lifecycle tests for client-side gating.
//!
//! Wires `SessionStore`, `NavigationController`, and `RecordingNavigator`
//! together the way a routed client would, and walks a visitor through
//! sign-in, profile completion, and sign-out.

use std::sync::Arc;
use std::time::Duration;

use portal_access::adapters::auth::MockSessionLoader;
use portal_access::adapters::navigation::RecordingNavigator;
use portal_access::adapters::session::SessionStore;
use portal_access::application::NavigationController;
use portal_access::domain::access::{GateOutcome, NavigationGate, NavigationMode};
use portal_access::ports::SessionResolver;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Client {
    store: Arc<SessionStore>,
    navigator: Arc<RecordingNavigator>,
    controller: NavigationController,
}

impl Client {
    fn new() -> Self {
        let store = Arc::new(SessionStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let controller = NavigationController::new(
            Arc::new(NavigationGate::portal()),
            store.clone(),
            navigator.clone(),
        );
        Self {
            store,
            navigator,
            controller,
        }
    }

    fn targets(&self) -> Vec<String> {
        self.navigator
            .navigations()
            .into_iter()
            .map(|n| n.target)
            .collect()
    }
}

fn loader() -> MockSessionLoader {
    MockSessionLoader::new()
        .with_test_user("new-donor", "donor-1", &["donator"], false)
        .with_test_user("director", "director-1", &["director"], true)
}

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn first_sign_in_walks_through_profile_completion() {
    let client = Client::new();
    client.store.resolve_with(&loader(), Some("new-donor")).await;

    // Any page bounces to the completion form
    client.controller.on_navigation("/donator");
    assert_eq!(client.targets(), vec!["/complete-profile"]);

    // The form itself renders, however often it is evaluated
    for _ in 0..3 {
        assert_eq!(
            client.controller.on_navigation("/complete-profile"),
            GateOutcome::Render
        );
    }
    assert_eq!(client.navigator.count(), 1);

    // Completing the profile is a one-time mutation
    assert!(client.store.complete_profile());
    assert!(!client.store.complete_profile());

    // Now the landing redirector takes over
    client.controller.on_navigation("/");
    assert_eq!(client.targets(), vec!["/complete-profile", "/donator"]);
    assert_eq!(client.controller.on_navigation("/donator"), GateOutcome::Render);
}

#[tokio::test]
async fn every_redirect_replaces_history() {
    let client = Client::new();
    client.store.resolve_with(&loader(), None).await;

    client.controller.on_navigation("/admin");
    client.controller.on_navigation("/director");

    assert!(client
        .navigator
        .navigations()
        .iter()
        .all(|n| n.mode == NavigationMode::Replace));
}

#[tokio::test(start_paused = true)]
async fn deep_link_waits_for_session_then_renders() {
    let client = Client::new();
    let slow = loader().with_delay(Duration::from_millis(800));

    let mut view = client.controller.mount("/director?tab=sedes");
    assert_eq!(view.outcome(), GateOutcome::Loading);

    let store = client.store.clone();
    let resolving =
        tokio::spawn(async move { store.resolve_with(&slow, Some("director")).await });

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(view.outcome(), GateOutcome::Loading);
    assert_eq!(client.navigator.count(), 0);

    resolving.await.unwrap();

    assert_eq!(view.settled().await, GateOutcome::Render);
    assert_eq!(client.navigator.count(), 0);
}

#[tokio::test]
async fn sign_out_on_mounted_dashboard_goes_to_login_once() {
    let client = Client::new();
    client.store.resolve_with(&loader(), Some("director")).await;
    let view = client.controller.mount("/director");
    settle().await;
    assert_eq!(view.outcome(), GateOutcome::Render);

    client.store.sign_out();
    settle().await;
    client.store.begin_loading();
    client.store.sign_out();
    settle().await;

    assert_eq!(client.targets(), vec!["/login"]);
    assert!(view.is_finished());
}

#[tokio::test]
async fn unmounted_view_ignores_later_session_changes() {
    let client = Client::new();
    let view = client.controller.mount("/admin");
    settle().await;
    drop(view);

    client.store.resolve_with(&loader(), None).await;
    settle().await;

    assert_eq!(client.navigator.count(), 0);
    assert!(!client.store.current().is_loading);
}
