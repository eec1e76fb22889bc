use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast;

use tokenward_core::error::SinkError;
use tokenward_core::TokenDeletedEvent;

use super::EventSink;

/// Broadcast-backed in-process bus.
///
/// Accepted means the bus is open. Zero subscribers still counts as accepted;
/// a lagging subscriber loses the oldest events, not the publisher.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<TokenDeletedEvent>,
    closed: AtomicBool,
}

impl InMemoryEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            closed: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TokenDeletedEvent> {
        self.sender.subscribe()
    }

    /// Refuse every publish from now on.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

#[async_trait]
impl EventSink for InMemoryEventBus {
    async fn publish(&self, event: TokenDeletedEvent) -> Result<(), SinkError> {
        if self.is_closed() {
            return Err(SinkError("event bus closed".into()));
        }
        match self.sender.send(event) {
            Ok(n) => tracing::debug!(subscribers = n, topic = TokenDeletedEvent::TOPIC, "event accepted"),
            Err(_) => tracing::debug!(topic = TokenDeletedEvent::TOPIC, "event accepted (no subscribers)"),
        }
        Ok(())
    }
}
