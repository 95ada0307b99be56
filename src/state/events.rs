use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::dto::events::AddressedEvent;

/// Broadcast hub fanning presentation events out to transport dispatchers.
pub struct EventHub {
    sender: broadcast::Sender<AddressedEvent>,
}

impl EventHub {
    /// Construct a new hub backed by a Tokio broadcast channel with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<AddressedEvent> {
        self.sender.subscribe()
    }

    /// Subscribe as a stream, convenient for transport select loops.
    pub fn stream(&self) -> BroadcastStream<AddressedEvent> {
        BroadcastStream::new(self.subscribe())
    }

    /// Send an event to all current subscribers, ignoring delivery errors.
    pub fn broadcast(&self, event: AddressedEvent) {
        let _ = self.sender.send(event);
    }
}
