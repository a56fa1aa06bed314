//! User preferences (pure Rust, no FFI).
//!
//! This module defines the preference structure that is serialized
//! to/from the JSON config file.

use serde::{Deserialize, Serialize};

use super::constants::*;

/// Colour scheme of the overlay widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the system light/dark setting.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    /// Resolve `Auto` against the system setting.
    pub fn is_dark(self, system_uses_light: bool) -> bool {
        match self {
            ThemeMode::Auto => !system_uses_light,
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
        }
    }

    /// Parse a stored value. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(ThemeMode::Auto),
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

/// Complete set of persisted preferences.
///
/// Missing keys in the stored file fall back to the defaults below
/// (theme = auto, compatibility mode off).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Widget colour scheme.
    pub theme: ThemeMode,
    /// Drive the slideshow with simulated keys instead of automation.
    pub compatibility_mode: bool,
    /// Pen width of the full-screen annotation layer.
    pub annotation_pen_width: u32,
    /// Pen width of the sketch pad.
    pub sketch_pen_width: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Auto,
            compatibility_mode: false,
            annotation_pen_width: ANNOTATION_PEN_WIDTH,
            sketch_pen_width: SKETCH_PEN_WIDTH,
        }
    }
}

impl Preferences {
    /// Clamps all values to valid ranges.
    pub fn validate(&mut self) {
        self.annotation_pen_width = self
            .annotation_pen_width
            .clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH);
        self.sketch_pen_width = self.sketch_pen_width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH);
    }
}
