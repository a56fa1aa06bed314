//! Application events for inter-module communication.
//!
//! Events are published by the overlay widgets, the tray menu and the
//! thumbnail export thread, and handled by the dispatcher on the main
//! thread. Pure Rust, no FFI.

use crate::model::{PenColor, ThemeMode};
use crate::presentation::PointerMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // === Slideshow commands (toolbar / navigation widgets) ===
    NextSlide,
    PreviousSlide,
    /// Jump to a 1-based slide (slide picker).
    GotoSlide(u32),
    SetPointerMode(PointerMode),
    SetPenColor(PenColor),
    ClearInk,
    ExitSlideShow,

    // === Overlay tools ===
    ToggleSpotlight,
    ToggleTimer,
    ToggleSketchPad,
    ToggleAnnotation,

    // === Settings (tray menu) ===
    SetCompatibilityMode(bool),
    SetAutorun(bool),
    SetTheme(ThemeMode),

    // === Background work ===
    /// The thumbnail export for this cache directory finished. `cached`
    /// is false when nothing usable is on disk.
    ThumbnailsReady { cache_key: String, cached: bool },

    /// Exit the slideshow, then quit.
    Quit,
}

impl AppEvent {
    /// Events that act on the running slideshow.
    pub fn is_slideshow_command(&self) -> bool {
        matches!(
            self,
            AppEvent::NextSlide
                | AppEvent::PreviousSlide
                | AppEvent::GotoSlide(_)
                | AppEvent::SetPointerMode(_)
                | AppEvent::SetPenColor(_)
                | AppEvent::ClearInk
                | AppEvent::ExitSlideShow
        )
    }

    /// Short description for logs.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::NextSlide => "Next slide",
            AppEvent::PreviousSlide => "Previous slide",
            AppEvent::GotoSlide(_) => "Go to slide",
            AppEvent::SetPointerMode(_) => "Set pointer mode",
            AppEvent::SetPenColor(_) => "Set pen colour",
            AppEvent::ClearInk => "Clear ink",
            AppEvent::ExitSlideShow => "Exit slideshow",
            AppEvent::ToggleSpotlight => "Toggle spotlight",
            AppEvent::ToggleTimer => "Toggle timer",
            AppEvent::ToggleSketchPad => "Toggle sketch pad",
            AppEvent::ToggleAnnotation => "Toggle annotation",
            AppEvent::SetCompatibilityMode(_) => "Set compatibility mode",
            AppEvent::SetAutorun(_) => "Set autorun",
            AppEvent::SetTheme(_) => "Set theme",
            AppEvent::ThumbnailsReady { .. } => "Thumbnails ready",
            AppEvent::Quit => "Quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slideshow_commands() {
        assert!(AppEvent::NextSlide.is_slideshow_command());
        assert!(AppEvent::GotoSlide(3).is_slideshow_command());
        assert!(AppEvent::SetPenColor(PenColor::RED).is_slideshow_command());
        assert!(!AppEvent::ToggleSpotlight.is_slideshow_command());
        assert!(!AppEvent::Quit.is_slideshow_command());
    }

    #[test]
    fn test_event_equality() {
        assert_eq!(AppEvent::GotoSlide(2), AppEvent::GotoSlide(2));
        assert_ne!(AppEvent::GotoSlide(2), AppEvent::GotoSlide(3));
    }

    #[test]
    fn test_all_events_have_descriptions() {
        let events = [
            AppEvent::NextSlide,
            AppEvent::PreviousSlide,
            AppEvent::GotoSlide(1),
            AppEvent::SetPointerMode(PointerMode::Pen),
            AppEvent::SetPenColor(PenColor::BLACK),
            AppEvent::ClearInk,
            AppEvent::ExitSlideShow,
            AppEvent::ToggleSpotlight,
            AppEvent::ToggleTimer,
            AppEvent::ToggleSketchPad,
            AppEvent::ToggleAnnotation,
            AppEvent::SetCompatibilityMode(true),
            AppEvent::SetAutorun(false),
            AppEvent::SetTheme(ThemeMode::Dark),
            AppEvent::ThumbnailsReady {
                cache_key: "k".into(),
                cached: true,
            },
            AppEvent::Quit,
        ];

        for event in events {
            assert!(!event.description().is_empty());
        }
    }
}
