//! Event system for decoupled inter-module communication.
//!
//! Built on the standard library `mpsc` channel:
//!
//! - Widgets, the tray menu and background threads publish without
//!   knowing who handles the event
//! - Multiple publishers can send concurrently
//! - Event types are plain enums, testable without FFI
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Toolbar   │     │  Tray menu  │     │  Thumbnail  │
//! │  Nav / Pad  │     │             │     │   export    │
//! └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!        │ publish()         │ publish()         │ publish()
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     EventBus                        │
//! │                   (mpsc channel)                    │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ drain()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                    Dispatcher                       │
//! │               (host event timer, 50 ms)             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: Event definitions (`AppEvent` enum)
//! - [`bus`]: `EventBus` and `EventPublisher` types
//! - [`global`]: Static bus for window procedures

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{drain_events, init_event_bus, publish, publisher};
pub use types::AppEvent;
