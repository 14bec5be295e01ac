use tabshell_core::event::ShellEvent;
use tokio::sync::broadcast;

/// Capacity of the event channel; slow subscribers lose the oldest events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Broadcasts `ShellEvent`s to every subscriber.
///
/// Publishing with no subscribers is fine; the event is simply dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ShellEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: ShellEvent) {
        // Err only means nobody is listening right now.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShellEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
