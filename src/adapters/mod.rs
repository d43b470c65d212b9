//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the access layer to external systems:
//! - `auth` - Session loaders (hosted auth JWTs, mock)
//! - `profile` - Profile readers (hosted REST, in-memory)
//! - `session` - Observable session store
//! - `navigation` - Navigator implementations
//! - `http` - Axum middleware and endpoints

pub mod auth;
pub mod http;
pub mod navigation;
pub mod profile;
pub mod session;

pub use auth::{JwtConfig, JwtSessionLoader, MockSessionLoader};
pub use navigation::{RecordedNavigation, RecordingNavigator};
pub use profile::{InMemoryProfileReader, RestProfileConfig, RestProfileReader};
pub use session::SessionStore;
