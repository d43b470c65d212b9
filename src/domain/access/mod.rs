//! Access module - role-based navigation gating.
//!
//! Pure, synchronous decisions over a [`SessionSnapshot`]:
//!
//! - `route_guard` - per-route authentication, profile and role checks
//! - `profile_interceptor` - forces one-time profile completion
//! - `landing_redirector` - sends `/` visitors to their dashboard
//! - `route_table` - static classification of portal routes
//! - `gate` - the three gates composed in nesting order
//!
//! [`SessionSnapshot`]: crate::domain::foundation::SessionSnapshot

mod decision;
mod gate;
mod landing_redirector;
mod paths;
mod profile_interceptor;
mod route_guard;
mod route_table;

pub use decision::{GateOutcome, InterceptDecision, NavigationMode, Redirect};
pub use gate::NavigationGate;
pub use landing_redirector::{landing_target, LandingRedirector, LANDING_PRIORITY};
pub use paths::{
    is_profile_exempt, route_path, COMPLETE_PROFILE_PATH, LOGIN_PATH, PROFILE_EXEMPT_ROUTES,
    ROOT_PATH,
};
pub use profile_interceptor::ProfileInterceptor;
pub use route_guard::{GuardOptions, RouteGuard};
pub use route_table::{
    portal_routes, RouteClass, RouteEntry, RoutePattern, RouteTable, RouteTableBuilder,
    RouteTableError,
};
