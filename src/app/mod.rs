//! Application-wide state.
//!
//! [`AppContext`] replaces ambient globals: it is constructed once at
//! startup and handed to the dispatcher and the window procedures.

pub mod context;

pub use context::{AppContext, Shell, Tool};
