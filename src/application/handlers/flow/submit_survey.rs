//! SubmitSurveyHandler - Final submission from the summary step.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::answer::{AnswerValue, QuestionId};
use crate::domain::code::{events, CodeToken};
use crate::domain::flow::{SurveySession, SurveyStep};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::ports::{AnswerRepository, CodeRepository, EventPublisher};

/// Handler for the one write that must not be lost.
///
/// Submission writes the full answer snapshot from the draft, then
/// marks the code completed. The snapshot goes first so the completed
/// guard on the answer log cannot reject it. Only after both writes
/// are durable does the session leave Summary; any failure leaves it
/// there so the user can retry, and the idempotent completion plus the
/// append-only log make the retry safe.
pub struct SubmitSurveyHandler {
    codes: Arc<dyn CodeRepository>,
    answers: Arc<dyn AnswerRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl SubmitSurveyHandler {
    pub fn new(
        codes: Arc<dyn CodeRepository>,
        answers: Arc<dyn AnswerRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            codes,
            answers,
            event_publisher,
        }
    }

    /// Submits a live session from its summary step.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the session is on Summary
    /// - `CodeNotStarted` if the code was never activated
    /// - `DatabaseError` on either write, session left on Summary
    pub async fn handle(&self, session: &mut SurveySession) -> Result<Timestamp, DomainError> {
        if session.step() != SurveyStep::Summary {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot submit from '{}'", session.step()),
            ));
        }
        let token = session.code().token().clone();
        let snapshot = session.draft().answered();

        let completed_at = self.handle_snapshot(&token, &snapshot).await?;
        session.finish()?;
        Ok(completed_at)
    }

    /// Submits a full answer snapshot for a code (the stateless HTTP
    /// variant, where the client keeps the session).
    ///
    /// # Errors
    ///
    /// - `CodeNotFound` for an unknown code
    /// - `CodeAlreadyCompleted` if the code was already submitted
    /// - `CodeNotStarted` if the code was never activated
    /// - `DatabaseError` on either write
    pub async fn handle_snapshot(
        &self,
        token: &CodeToken,
        answers: &[(QuestionId, AnswerValue)],
    ) -> Result<Timestamp, DomainError> {
        let code = self
            .codes
            .find_by_token(token)
            .await?
            .ok_or_else(|| DomainError::code_not_found(token))?;

        self.answers.append_all(code.id(), answers).await?;
        let completed_at = self.codes.complete(token).await?;

        info!(code = %token, answers = answers.len(), "survey submitted");
        // the completion itself is durable at this point; a lost event
        // must not make the submit look failed
        if let Err(err) = self
            .event_publisher
            .publish(events::survey_completed(token, completed_at))
            .await
        {
            warn!(code = %token, error = %err, "completion event not published");
        }

        Ok(completed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::domain::flow::{StepInput, SurveyStep};
    use crate::domain::code::{CodeToken, Language, Scope, ServiceType, SurveyCode};
    use crate::domain::foundation::{ProjectId, SurveyCodeId};

    async fn session_on_summary(
        store: &Arc<InMemorySurveyStore>,
    ) -> SurveySession {
        let token = CodeToken::parse("RSTU2345").unwrap();
        let code = SurveyCode::new(
            SurveyCodeId::new(),
            token.clone(),
            "Tomas Brand".to_string(),
            "tomas@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Strategy,
            Language::default(),
            vec![Scope::Strategy],
        )
        .unwrap();
        store.save(&code).await.unwrap();
        store.activate(&token).await.unwrap();

        let mut session = SurveySession::open(store.find_by_token(&token).await.unwrap().unwrap());
        session.advance(&StepInput::Begin).unwrap();
        session.advance(&StepInput::Score(9)).unwrap();
        session
            .advance(&StepInput::Text("fast and sharp".to_string()))
            .unwrap();
        session.advance(&StepInput::Score(10)).unwrap();
        session
            .advance(&StepInput::Text("would hire again".to_string()))
            .unwrap();
        session.advance(&StepInput::Choice(true)).unwrap();
        assert_eq!(session.step(), SurveyStep::Summary);
        session
    }

    #[tokio::test]
    async fn submit_writes_snapshot_and_completes() {
        let store = Arc::new(InMemorySurveyStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = SubmitSurveyHandler::new(store.clone(), store.clone(), bus.clone());
        let mut session = session_on_summary(&store).await;

        handler.handle(&mut session).await.unwrap();

        assert_eq!(session.step(), SurveyStep::ThankYou);
        assert_eq!(store.answer_count(), 5);
        let code = store.code_snapshot(session.code().token()).unwrap();
        assert!(code.is_completed());
        assert!(bus.has_event("survey.completed.v1"));
    }

    #[tokio::test]
    async fn failed_completion_keeps_session_on_summary() {
        let store = Arc::new(InMemorySurveyStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = SubmitSurveyHandler::new(store.clone(), store.clone(), bus.clone());
        let mut session = session_on_summary(&store).await;

        store.set_fail_completions(true);
        assert!(handler.handle(&mut session).await.is_err());
        assert_eq!(session.step(), SurveyStep::Summary);
        assert!(!bus.has_event("survey.completed.v1"));

        // retry succeeds once the store recovers
        store.set_fail_completions(false);
        handler.handle(&mut session).await.unwrap();
        assert_eq!(session.step(), SurveyStep::ThankYou);
    }

    #[tokio::test]
    async fn repeated_submit_reports_one_completion_time() {
        let store = Arc::new(InMemorySurveyStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = SubmitSurveyHandler::new(store.clone(), store.clone(), bus.clone());
        let mut session = session_on_summary(&store).await;

        let first = handler.handle(&mut session).await.unwrap();
        // a second submit from the same session is a state error, but
        // the completion timestamp stays what the first write stamped
        assert!(handler.handle(&mut session).await.is_err());
        let code = store.code_snapshot(session.code().token()).unwrap();
        assert_eq!(code.completed_at().copied(), Some(first));
    }
}
