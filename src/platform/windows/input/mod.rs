//! Input for the keystroke back end and the annotation layer.
//!
//! - [`lookup`]: slideshow window lookup and focus
//! - [`keys`]: `SendInput` key presses
//! - [`capture`]: exclusive mouse capture while annotating

pub mod capture;
pub mod keys;
pub mod lookup;

pub use capture::InputCaptureGuard;
pub use keys::SendInputKeys;
pub use lookup::{activate_window, Win32WindowLocator};
