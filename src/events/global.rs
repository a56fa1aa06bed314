//! Process-wide event bus for window procedures.
//!
//! Win32 window procedures are plain `extern "system"` functions with no
//! room for a context argument, so the widgets publish through this static
//! bus. The host initialises it once and drains it from its poll timer.
//!
//! - `Sender` is stored in `OnceLock`; it is `Send + Sync`.
//! - `Receiver` is stored in a `Mutex`, only ever locked by the main thread.
//!
//! # Example
//!
//! ```ignore
//! events::init_event_bus();
//!
//! // In a window procedure:
//! events::publish(AppEvent::NextSlide);
//!
//! // In the host timer:
//! let flow = dispatch_events(&mut ctx, events::drain_events());
//! ```

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, OnceLock};

use tracing::warn;

use super::bus::EventPublisher;
use super::types::AppEvent;

static SENDER: OnceLock<Sender<AppEvent>> = OnceLock::new();
static RECEIVER: OnceLock<Mutex<Receiver<AppEvent>>> = OnceLock::new();

/// Initialise the global bus. Returns `false` if it already was.
pub fn init_event_bus() -> bool {
    let (sender, receiver) = mpsc::channel();
    if SENDER.set(sender).is_err() {
        return false;
    }
    RECEIVER.set(Mutex::new(receiver)).is_ok()
}

/// A publisher for the global bus, if initialised.
pub fn publisher() -> Option<EventPublisher> {
    SENDER.get().map(|s| EventPublisher::from_sender(s.clone()))
}

/// Publish to the global bus. Dropped with a warning before init.
pub fn publish(event: AppEvent) {
    match SENDER.get() {
        Some(sender) => {
            // receiver gone means the app is shutting down
            let _ = sender.send(event);
        }
        None => warn!(event = event.description(), "event bus not initialised, dropping event"),
    }
}

/// Everything published since the last drain.
pub fn drain_events() -> Vec<AppEvent> {
    let Some(receiver) = RECEIVER.get() else {
        return Vec::new();
    };
    let receiver = match receiver.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    receiver.try_iter().collect()
}
