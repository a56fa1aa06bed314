//! mpsc-backed [`EventBus`]: publish from any thread, drain on the UI thread.

use std::sync::mpsc::{self, Receiver, Sender};

use super::types::AppEvent;

/// Single-consumer queue of [`AppEvent`]s.
///
/// ```
/// use podium::events::{AppEvent, EventBus};
///
/// let bus = EventBus::new();
/// bus.publisher().publish(AppEvent::NextSlide);
/// assert_eq!(bus.drain(), vec![AppEvent::NextSlide]);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn publisher(&self) -> EventPublisher {
        EventPublisher(self.sender.clone())
    }

    /// Next queued event, if any. Never blocks.
    pub fn try_recv(&self) -> Option<AppEvent> {
        // The bus keeps its own sender, so the channel cannot disconnect.
        self.receiver.try_recv().ok()
    }

    /// Everything queued so far, in publish order.
    pub fn drain(&self) -> Vec<AppEvent> {
        self.receiver.try_iter().collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half handed to widgets, the tray and worker threads.
#[derive(Clone)]
pub struct EventPublisher(Sender<AppEvent>);

impl EventPublisher {
    pub fn from_sender(sender: Sender<AppEvent>) -> Self {
        Self(sender)
    }

    /// Queue `event`. Dropped silently once the bus is gone.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.0.send(event);
    }
}
