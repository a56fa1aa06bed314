//! Windows implementation on Win32 and COM.
//!
//! - `automation`: PowerPoint / WPS slideshow driver and thumbnail export
//! - `input`: slideshow window lookup, simulated keys, mouse capture
//! - `storage`: registry settings (autorun, system theme)
//! - `ui`: tray icon, overlay widgets and the tool windows
//! - `app`: the thread-local application context and its shell

pub mod app;
pub mod automation;
pub mod ffi;
pub mod input;
pub mod storage;
pub mod ui;
