//! Authentication adapters.
//!
//! Implementations of the `SessionLoader` port:
//!
//! - `jwt` - Hosted auth service tokens (HS256) plus the profile table
//! - `mock` - Test implementation that doesn't require external services

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionLoader};
pub use mock::MockSessionLoader;
