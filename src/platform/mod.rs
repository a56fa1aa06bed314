//! Platform-specific implementations.
//!
//! Only Windows is supported; the portable core compiles everywhere so it
//! can be tested without a desktop.

#[cfg(target_os = "windows")]
pub mod windows;
