//! Presentation overlay helper for PowerPoint and WPS.
//!
//! Everything outside [`platform`] is pure Rust with no FFI, so the undo
//! history, the poller state machine and the drawing models run as normal
//! tests on any OS. The Win32 side only renders what these types compute
//! and forwards input back into them.

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod history;
pub mod logging;
pub mod model;
pub mod poller;
pub mod presentation;
pub mod spotlight;
pub mod thumbnails;
pub mod timer;

#[cfg(target_os = "windows")]
pub mod platform;

pub use app::{AppContext, Shell, Tool};
pub use events::{AppEvent, EventBus, EventPublisher};
pub use poller::{Command, OverlayState, Poller};
