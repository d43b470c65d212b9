//! Domain layer containing the access rules and their vocabulary.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, roles, session types, errors)
//! - `access` - Route guard, profile interceptor, landing redirector, route table

pub mod access;
pub mod foundation;
