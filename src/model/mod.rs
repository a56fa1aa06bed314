//! Application domain model.
//!
//! This module contains pure business logic (no FFI dependencies)
//! including user preferences, pen colours and configuration constants.
//!
//! Persistence of preferences is in [`crate::config`].

pub mod constants;
pub mod geometry;
pub mod pen;
pub mod preferences;

pub use constants::*;
pub use geometry::{Point, Rect};
pub use pen::{PenColor, PALETTE, PALETTE_NAMES};
pub use preferences::{Preferences, ThemeMode};
