//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the access layer and the outside world. Adapters implement these ports.
//!
//! ## Session Ports
//!
//! - `SessionResolver` - Synchronous view of the current session
//! - `SessionLoader` - Resolves an access token into a user
//! - `ProfileReader` - Reads the portal's profile rows
//!
//! ## Routing Ports
//!
//! - `Navigator` - Performs client-side navigations

mod navigator;
mod profile_reader;
mod session_loader;
mod session_resolver;

pub use navigator::Navigator;
pub use profile_reader::{ProfileReader, ProfileRecord};
pub use session_loader::SessionLoader;
pub use session_resolver::SessionResolver;
