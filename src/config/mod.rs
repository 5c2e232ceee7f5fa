//! Configuration model for kioskctl.
//!
//! The host reads an optional YAML file. Every field has a default, unknown
//! fields are ignored for forward compatibility, and values are validated
//! after parsing.

mod model;
mod operations;
pub mod types;


pub use model::Config;
pub use types::{DEFAULT_CHANNEL, FacilityConfig};
