//! Configuration module for reelspin
//!
//! Machine settings come from built-in defaults, an optional JSON file and
//! command line overrides, in that order.

pub mod machine;

pub use machine::{ConfigError, MachineConfig};
