//! Profile adapters.
//!
//! Implementations of the `ProfileReader` port:
//!
//! - `rest_reader` - Hosted backend REST interface
//! - `in_memory` - Test and local development store

mod in_memory;
mod rest_reader;

pub use in_memory::InMemoryProfileReader;
pub use rest_reader::{RestProfileConfig, RestProfileReader};
