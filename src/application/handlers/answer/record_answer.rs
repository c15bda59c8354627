//! RecordAnswerHandler - Command handler for appending one answer row.

use std::sync::Arc;

use crate::domain::answer::{AnswerValue, QuestionId, SurveyAnswer};
use crate::domain::code::CodeToken;
use crate::domain::foundation::DomainError;
use crate::ports::{AnswerRepository, CodeRepository};

/// Command to record a single answer against a code.
#[derive(Debug, Clone)]
pub struct RecordAnswerCommand {
    pub code: CodeToken,
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

/// Handler that appends one row to the answer log.
///
/// The log never updates in place; re-answering a question adds a
/// newer row and readers take the latest per question.
pub struct RecordAnswerHandler {
    codes: Arc<dyn CodeRepository>,
    answers: Arc<dyn AnswerRepository>,
}

impl RecordAnswerHandler {
    pub fn new(codes: Arc<dyn CodeRepository>, answers: Arc<dyn AnswerRepository>) -> Self {
        Self { codes, answers }
    }

    /// # Errors
    ///
    /// - `CodeNotFound` for an unknown code
    /// - `CodeAlreadyCompleted` if the code is terminal
    /// - `DatabaseError` on persistence failure
    pub async fn handle(&self, cmd: RecordAnswerCommand) -> Result<SurveyAnswer, DomainError> {
        let code = self
            .codes
            .find_by_token(&cmd.code)
            .await?
            .ok_or_else(|| DomainError::code_not_found(&cmd.code))?;

        self.answers
            .append(code.id(), cmd.question_id, &cmd.value)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::domain::code::{Language, Scope, ServiceType, SurveyCode};
    use crate::domain::foundation::{ErrorCode, ProjectId, SurveyCodeId};

    async fn seeded() -> (Arc<InMemorySurveyStore>, CodeToken) {
        let store = Arc::new(InMemorySurveyStore::new());
        let token = CodeToken::parse("QWER2345").unwrap();
        let code = SurveyCode::new(
            SurveyCodeId::new(),
            token.clone(),
            "Jo Meyer".to_string(),
            "jo@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Experience,
            Language::default(),
            vec![Scope::Design],
        )
        .unwrap();
        use crate::ports::CodeRepository as _;
        store.save(&code).await.unwrap();
        (store, token)
    }

    #[tokio::test]
    async fn appends_rows_without_overwriting() {
        let (store, token) = seeded().await;
        let handler = RecordAnswerHandler::new(store.clone(), store.clone());

        for score in [4, 9] {
            handler
                .handle(RecordAnswerCommand {
                    code: token.clone(),
                    question_id: QuestionId::RecommendScore,
                    value: AnswerValue::score(score).unwrap(),
                })
                .await
                .unwrap();
        }
        assert_eq!(store.answer_count(), 2);
    }

    #[tokio::test]
    async fn unknown_code_is_rejected() {
        let (store, _) = seeded().await;
        let handler = RecordAnswerHandler::new(store.clone(), store);

        let err = handler
            .handle(RecordAnswerCommand {
                code: CodeToken::parse("ZZZZ9999").unwrap(),
                question_id: QuestionId::Testimonial,
                value: AnswerValue::text("testimonial", "great work").unwrap(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CodeNotFound);
    }
}
