//! Navigation gate pipeline.
//!
//! Composes the three gates in their fixed nesting order:
//!
//! ```text
//! ProfileInterceptor        (whole routed tree, outermost)
//!   └─ LandingRedirector    (only on "/")
//!        └─ RouteGuard      (per protected route, innermost)
//! ```
//!
//! Each gate reads the same snapshot independently; none of them fetches
//! anything.

use std::sync::Arc;

use crate::domain::foundation::SessionSnapshot;

use super::decision::{GateOutcome, InterceptDecision};
use super::landing_redirector::LandingRedirector;
use super::paths::{route_path, ROOT_PATH};
use super::profile_interceptor::ProfileInterceptor;
use super::route_guard::RouteGuard;
use super::route_table::{portal_routes, RouteTable};

/// Full gating decision for one navigation.
#[derive(Debug, Clone)]
pub struct NavigationGate {
    routes: Arc<RouteTable>,
    interceptor: ProfileInterceptor,
    landing: LandingRedirector,
}

impl NavigationGate {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes: Arc::new(routes),
            interceptor: ProfileInterceptor::new(),
            landing: LandingRedirector::new(),
        }
    }

    /// Gate over the foundation portal's route table.
    pub fn portal() -> Self {
        Self::new(portal_routes().clone())
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decides the outcome of navigating to `location` with `session`.
    ///
    /// `location` may carry a query string or fragment; only the path part
    /// is gated.
    pub fn evaluate(&self, session: &SessionSnapshot, location: &str) -> GateOutcome {
        let path = route_path(location);

        if let InterceptDecision::Redirect(redirect) = self.interceptor.evaluate(session, path) {
            return GateOutcome::Redirect(redirect);
        }

        if path == ROOT_PATH {
            return self.landing.evaluate(session);
        }

        let class = self.routes.classify(path);
        if !class.requires_auth {
            return GateOutcome::Render;
        }

        RouteGuard::new(class.guard_options()).evaluate(session, path)
    }
}

impl Default for NavigationGate {
    fn default() -> Self {
        Self::portal()
    }
}
