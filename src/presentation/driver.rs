//! Rich interface contract: a queryable handle to a running slideshow.
//!
//! Every call may fail; the caller treats any `Err` as "unavailable".

use super::types::{AppKind, PointerMode};
use crate::error::DriverResult;
use crate::model::PenColor;

/// A live slideshow view (`SlideShowWindows(1).View`).
pub trait SlideShowView {
    /// 1-based index of the slide being shown.
    fn slide_index(&mut self) -> DriverResult<u32>;
    fn next(&mut self) -> DriverResult<()>;
    fn previous(&mut self) -> DriverResult<()>;
    fn goto(&mut self, index: u32) -> DriverResult<()>;
    /// Raw pointer code; see [`PointerMode::from_code`].
    fn pointer_code(&mut self) -> DriverResult<i32>;
    fn set_pointer_mode(&mut self, mode: PointerMode) -> DriverResult<()>;
    fn set_pointer_color(&mut self, color: PenColor) -> DriverResult<()>;
    fn erase_drawing(&mut self) -> DriverResult<()>;
    fn exit(&mut self) -> DriverResult<()>;
    /// Whether any shape on the current slide is ink.
    fn slide_has_ink(&mut self) -> DriverResult<bool>;
}

/// Connection to PowerPoint or WPS Presentation.
pub trait PresentationApp {
    /// (Re)attach to a running automation server.
    fn connect(&mut self) -> DriverResult<AppKind>;

    /// The active slideshow view, reconnecting once if the cached
    /// connection went stale.
    fn active_view(&mut self) -> DriverResult<Box<dyn SlideShowView>>;

    fn slide_count(&mut self) -> DriverResult<u32>;

    /// Full path of the active presentation, used as a cache key.
    fn presentation_path(&mut self) -> DriverResult<String>;

    /// Restore and focus the slideshow window.
    fn activate_slideshow_window(&mut self) -> DriverResult<()>;
}
