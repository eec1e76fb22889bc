//! Event sink seam for `TokenDeletedEvent`.
//!
//! `publish` returns once the sink has accepted the event. Subscriber
//! delivery and processing happen out of band.

pub mod bus;

use async_trait::async_trait;

use tokenward_core::error::SinkError;
use tokenward_core::TokenDeletedEvent;

pub use bus::InMemoryEventBus;

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, event: TokenDeletedEvent) -> Result<(), SinkError>;
}
