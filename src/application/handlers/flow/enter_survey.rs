//! EnterSurveyHandler - Opens a survey session for an access code.

use std::sync::Arc;

use crate::domain::code::CodeToken;
use crate::domain::flow::SurveySession;
use crate::domain::foundation::DomainError;
use crate::ports::CodeRepository;

/// Handler that validates a code and opens its session.
///
/// Opening never mutates anything: activation happens on the first
/// forward step, not on lookup, so previewing a link leaves no trace.
pub struct EnterSurveyHandler {
    codes: Arc<dyn CodeRepository>,
}

impl EnterSurveyHandler {
    pub fn new(codes: Arc<dyn CodeRepository>) -> Self {
        Self { codes }
    }

    /// # Errors
    ///
    /// - `CodeNotFound` for an unknown code
    /// - `DatabaseError` on lookup failure
    pub async fn handle(&self, token: &CodeToken) -> Result<SurveySession, DomainError> {
        let code = self
            .codes
            .find_by_token(token)
            .await?
            .ok_or_else(|| DomainError::code_not_found(token))?;
        Ok(SurveySession::open(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::domain::code::{Language, Scope, ServiceType, SurveyCode};
    use crate::domain::flow::SurveyStep;
    use crate::domain::foundation::{ErrorCode, ProjectId, SurveyCodeId};

    async fn store_with(token: &CodeToken) -> Arc<InMemorySurveyStore> {
        let store = Arc::new(InMemorySurveyStore::new());
        let code = SurveyCode::new(
            SurveyCodeId::new(),
            token.clone(),
            "Priya Nair".to_string(),
            "priya@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Strategy,
            Language::default(),
            vec![Scope::Solutions],
        )
        .unwrap();
        store.save(&code).await.unwrap();
        store
    }

    #[tokio::test]
    async fn fresh_code_opens_on_welcome() {
        let token = CodeToken::parse("FGHJ2345").unwrap();
        let store = store_with(&token).await;
        let handler = EnterSurveyHandler::new(store.clone());

        let session = handler.handle(&token).await.unwrap();
        assert_eq!(session.step(), SurveyStep::Welcome);
        // lookup must not activate
        assert!(store.code_snapshot(&token).unwrap().started_at().is_none());
    }

    #[tokio::test]
    async fn completed_code_opens_on_code_used() {
        let token = CodeToken::parse("FGHJ2345").unwrap();
        let store = store_with(&token).await;
        store.activate(&token).await.unwrap();
        store.complete(&token).await.unwrap();

        let handler = EnterSurveyHandler::new(store);
        let session = handler.handle(&token).await.unwrap();
        assert_eq!(session.step(), SurveyStep::CodeUsed);
    }

    #[tokio::test]
    async fn unknown_code_is_rejected() {
        let token = CodeToken::parse("FGHJ2345").unwrap();
        let store = store_with(&token).await;
        let handler = EnterSurveyHandler::new(store);

        let err = handler
            .handle(&CodeToken::parse("WXYZ2345").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CodeNotFound);
    }
}
