//! The application context as seen from window procedures.

pub mod shell;
pub mod state;

pub use shell::{TrayNotifier, Win32Shell};
pub use state::{install, take, with_app};
