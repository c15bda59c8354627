//! In-memory event capture for testing.
//!
//! Testing only: methods use `.expect()` on lock operations and will
//! panic if a lock is poisoned. Production wiring uses the tracing
//! publisher.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Event publisher that captures envelopes for test assertions.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("code.activated.v1"));
/// ```
#[derive(Default)]
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Returns all published events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns whether any event of the given type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        !self.events_of_type(event_type).is_empty()
    }

    /// Total number of published events.
    pub fn event_count(&self) -> usize {
        self.published_events().len()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryEventBus: published lock poisoned")
            .push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope::new(
            event_type,
            "ABC23456",
            "SurveyCode",
            json!({"code": "ABC23456"}),
        )
    }

    #[tokio::test]
    async fn captures_published_events() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("code.activated.v1")).await.unwrap();
        bus.publish(envelope("survey.completed.v1")).await.unwrap();

        assert_eq!(bus.event_count(), 2);
        assert!(bus.has_event("code.activated.v1"));
        assert_eq!(bus.events_of_type("survey.completed.v1").len(), 1);
        assert!(!bus.has_event("code.generated.v1"));
    }
}
