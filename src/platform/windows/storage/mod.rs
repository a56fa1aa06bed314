//! Per-user registry settings.
//!
//! Preferences themselves live in the JSON file handled by
//! [`crate::config`]; this module only covers what Windows owns.

mod registry;

pub use registry::*;
