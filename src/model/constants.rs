//! Configuration constants and default values.
//!
//! This module contains all application constants including polling
//! intervals, layout margins, history capacity, automation codes and
//! config file names.

use std::time::Duration;

// === Polling ===

/// Interval between two presentation state samples.
pub const POLL_INTERVAL_MS: u32 = 500;

/// [`POLL_INTERVAL_MS`] as a `Duration`.
pub const POLL_INTERVAL: Duration = Duration::from_millis(POLL_INTERVAL_MS as u64);

// === Layout ===

/// Distance between overlay widgets and the screen edges, in pixels.
pub const WIDGET_MARGIN: i32 = 20;

// === Drawing ===

/// Number of snapshots kept by each canvas history.
pub const HISTORY_CAPACITY: usize = 50;

/// Default pen width for the full-screen annotation layer.
pub const ANNOTATION_PEN_WIDTH: u32 = 5;

/// Default pen width for the sketch pad.
pub const SKETCH_PEN_WIDTH: u32 = 3;

/// Minimum pen width in pixels.
pub const MIN_PEN_WIDTH: u32 = 1;

/// Maximum pen width in pixels.
pub const MAX_PEN_WIDTH: u32 = 64;

/// Initial sketch pad size.
pub const SKETCH_PAD_SIZE: (u32, u32) = (400, 300);

// === Automation codes ===

/// `PpSlideShowPointerType` value for the arrow pointer.
pub const POINTER_CODE_ARROW: i32 = 1;

/// `PpSlideShowPointerType` value for the pen.
pub const POINTER_CODE_PEN: i32 = 2;

/// `PpSlideShowPointerType` value for the eraser.
pub const POINTER_CODE_ERASER: i32 = 5;

/// `MsoShapeType` value of an ink shape.
pub const SHAPE_TYPE_INK: i32 = 22;

/// ProgIDs probed, in order, when connecting to a running presentation app.
pub const OFFICE_PROG_ID: &str = "PowerPoint.Application";
pub const WPS_PROG_IDS: &[&str] = &["Kwpp.Application", "Wpp.Application"];

// === Detection keywords ===

/// Lower-case process name fragments of presentation-capable applications.
pub const PROCESS_KEYWORDS: &[&str] = &["powerpnt", "wpp", "wps"];

/// Lower-case window title fragments of slideshow windows.
pub const WINDOW_TITLE_KEYWORDS: &[&str] = &["wps", "powerpoint", "演示"];

/// Lower-case window class fragments of slideshow windows.
pub const WINDOW_CLASS_KEYWORDS: &[&str] = &["wpp", "powerpnt", "presentation"];

// === Thumbnails ===

/// Exported slide thumbnail width.
pub const THUMBNAIL_WIDTH: u32 = 320;

/// Exported slide thumbnail height.
pub const THUMBNAIL_HEIGHT: u32 = 180;

// === Storage ===

/// Application name used for the config directory and autorun entry.
pub const APP_NAME: &str = "Podium";

/// Config file name inside the application directory.
pub const CONFIG_FILE: &str = "config.json";

/// Thumbnail cache directory inside the application directory.
pub const CACHE_DIR: &str = "Cache";

// === Advisory messages ===

/// Title used for every advisory notification.
pub const ADVISORY_TITLE: &str = "Podium";

/// Shown when a clear/eraser request finds no ink on the current slide.
pub const MSG_NO_INK: &str = "No ink on this slide";

/// Shown when the pointer type could not be changed in compatibility mode.
pub const MSG_POINTER_FAILED: &str = "Cannot change pointer type";

/// Shown once when the overlay appears in compatibility mode.
pub const MSG_COMPAT_ACTIVE: &str = "Compatibility mode is on, using simulated keys";

/// Balloon shown after enabling start on login.
pub const MSG_AUTORUN_ON: &str = "Podium will start when you sign in";

/// Balloon shown after disabling start on login.
pub const MSG_AUTORUN_OFF: &str = "Podium will no longer start when you sign in";

/// Balloon shown after switching compatibility mode on.
pub const MSG_COMPAT_ON: &str = "Compatibility mode enabled";

/// Balloon shown after switching compatibility mode off.
pub const MSG_COMPAT_OFF: &str = "Compatibility mode disabled";
