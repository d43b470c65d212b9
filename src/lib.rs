//! Portal Access - role-based access control and navigation gating for the
//! foundation donation portal.
//!
//! Three gates decide, for every navigation, whether a visitor sees the
//! requested page, a loading indicator, an access-denied notice, or is
//! redirected:
//!
//! - **Route guard** - authentication, profile completion, and role checks
//!   around a protected view
//! - **Profile interceptor** - sends users with an incomplete profile to the
//!   completion form from anywhere but a few exempt pages
//! - **Landing redirector** - sends signed-in users from `/` to their
//!   dashboard

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
