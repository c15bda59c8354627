//! ActivateCodeHandler - Stamps a code's first-opened timestamp.

use std::sync::Arc;

use tracing::warn;

use crate::domain::code::{events, CodeToken};
use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::{CodeRepository, EventPublisher};

/// Handler for the activation write.
///
/// The repository performs the null-to-timestamp transition atomically,
/// so concurrent activations of one code all observe the same instant.
/// Repeat calls are no-ops that return the original timestamp.
pub struct ActivateCodeHandler {
    codes: Arc<dyn CodeRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ActivateCodeHandler {
    pub fn new(codes: Arc<dyn CodeRepository>, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            codes,
            event_publisher,
        }
    }

    /// # Errors
    ///
    /// - `CodeNotFound` for an unknown code
    /// - `CodeAlreadyCompleted` for a code past its lifecycle
    /// - `DatabaseError` on persistence failure
    pub async fn handle(&self, token: &CodeToken) -> Result<Timestamp, DomainError> {
        let started_at = self.codes.activate(token).await?;
        if let Err(err) = self
            .event_publisher
            .publish(events::code_activated(token, started_at))
            .await
        {
            warn!(code = %token, error = %err, "activation event not published");
        }
        Ok(started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::domain::code::{Language, Scope, ServiceType, SurveyCode};
    use crate::domain::foundation::{ErrorCode, ProjectId, SurveyCodeId};

    async fn fixture() -> (Arc<InMemorySurveyStore>, ActivateCodeHandler, CodeToken) {
        let store = Arc::new(InMemorySurveyStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let token = CodeToken::parse("VWXY2345").unwrap();
        let code = SurveyCode::new(
            SurveyCodeId::new(),
            token.clone(),
            "Sam Okafor".to_string(),
            "sam@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Experience,
            Language::default(),
            vec![Scope::Solutions],
        )
        .unwrap();
        store.save(&code).await.unwrap();
        let handler = ActivateCodeHandler::new(store.clone(), bus);
        (store, handler, token)
    }

    #[tokio::test]
    async fn repeat_activation_returns_first_timestamp() {
        let (_store, handler, token) = fixture().await;

        let first = handler.handle(&token).await.unwrap();
        let second = handler.handle(&token).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn completed_code_cannot_reactivate() {
        let (store, handler, token) = fixture().await;
        handler.handle(&token).await.unwrap();
        store.complete(&token).await.unwrap();

        let err = handler.handle(&token).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CodeAlreadyCompleted);
    }
}
