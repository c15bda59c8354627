//! Event publisher backed by structured logging.
//!
//! The survey backend has no downstream consumers yet; envelopes are
//! emitted as structured log records so operators can tail the event
//! stream and a real broker adapter can replace this one later without
//! touching the handlers.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Publishes events as structured `tracing` records.
#[derive(Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_id = %event.aggregate_id,
            aggregate_type = %event.aggregate_type,
            occurred_at = %event.occurred_at,
            payload = %event.payload,
            "domain event published"
        );
        Ok(())
    }
}
