//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the role vocabulary, session types and error types
//! that form the vocabulary of the access layer.

mod auth;
mod errors;
mod ids;
mod role;

pub use auth::{AuthError, SessionSnapshot, UserProfile};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use role::{AllowedRoles, Role, RoleSet};
