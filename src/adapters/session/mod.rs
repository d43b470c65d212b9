//! Session adapters.
//!
//! - `store` - Watch-channel backed `SessionResolver`

mod store;

pub use store::SessionStore;
