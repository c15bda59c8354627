//! In-memory survey store for testing.
//!
//! One store implements the code repository, answer log, and response
//! reader over a single mutex so the lifecycle guard sees the same
//! state the answer log does. The mutex gives `activate` the same
//! compare-and-set semantics the SQL adapter gets from its conditional
//! update.
//!
//! Test-only: methods panic if the internal lock is poisoned, which is
//! acceptable in tests and never shipped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::answer::{AnswerValue, QuestionId, SurveyAnswer};
use crate::domain::code::{CodeToken, SurveyCode};
use crate::domain::foundation::{
    DomainError, ErrorCode, SurveyCodeId, Timestamp,
};
use crate::domain::reporting::CodeResponse;
use crate::ports::{AnswerRepository, CodeRepository, ResponseReader};

#[derive(Default)]
struct State {
    codes: HashMap<String, SurveyCode>,
    answers: Vec<SurveyAnswer>,
}

/// In-memory implementation of the survey persistence ports.
#[derive(Default)]
pub struct InMemorySurveyStore {
    state: Mutex<State>,
    fail_completions: AtomicBool,
    fail_appends: AtomicBool,
}

impl InMemorySurveyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// Makes every `complete` call fail until switched off (exercises
    /// the Summary retry gate).
    pub fn set_fail_completions(&self, fail: bool) {
        self.fail_completions.store(fail, Ordering::SeqCst);
    }

    /// Makes every append fail until switched off (exercises
    /// best-effort recording).
    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// Number of recorded answer rows (for assertions).
    pub fn answer_count(&self) -> usize {
        self.state.lock().expect("survey store lock poisoned").answers.len()
    }

    /// Snapshot of a stored code (for assertions).
    pub fn code_snapshot(&self, token: &CodeToken) -> Option<SurveyCode> {
        self.state
            .lock()
            .expect("survey store lock poisoned")
            .codes
            .get(token.as_str())
            .cloned()
    }

    fn check_appendable(state: &State, survey_code_id: &SurveyCodeId) -> Result<(), DomainError> {
        let code = state
            .codes
            .values()
            .find(|c| c.id() == survey_code_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::CodeNotFound,
                    format!("Survey code not found: {}", survey_code_id),
                )
            })?;
        if code.is_completed() {
            return Err(DomainError::new(
                ErrorCode::CodeAlreadyCompleted,
                format!("Code {} no longer accepts answers", code.token()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CodeRepository for InMemorySurveyStore {
    async fn save(&self, code: &SurveyCode) -> Result<(), DomainError> {
        let mut state = self.state.lock().expect("survey store lock poisoned");
        if state.codes.contains_key(code.token().as_str()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("duplicate key value: code {}", code.token()),
            ));
        }
        state.codes.insert(code.token().as_str().to_string(), code.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &CodeToken,
    ) -> Result<Option<SurveyCode>, DomainError> {
        let state = self.state.lock().expect("survey store lock poisoned");
        Ok(state.codes.get(token.as_str()).cloned())
    }

    async fn token_exists(&self, token: &CodeToken) -> Result<bool, DomainError> {
        let state = self.state.lock().expect("survey store lock poisoned");
        Ok(state.codes.contains_key(token.as_str()))
    }

    async fn activate(&self, token: &CodeToken) -> Result<Timestamp, DomainError> {
        let mut state = self.state.lock().expect("survey store lock poisoned");
        let code = state
            .codes
            .get_mut(token.as_str())
            .ok_or_else(|| DomainError::code_not_found(token))?;
        // the aggregate enforces null -> timestamp exactly once; the
        // lock makes the check-and-set atomic
        code.start(Timestamp::now())
    }

    async fn complete(&self, token: &CodeToken) -> Result<Timestamp, DomainError> {
        if self.fail_completions.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "injected completion failure",
            ));
        }
        let mut state = self.state.lock().expect("survey store lock poisoned");
        let code = state
            .codes
            .get_mut(token.as_str())
            .ok_or_else(|| DomainError::code_not_found(token))?;
        code.complete(Timestamp::now())
    }
}

#[async_trait]
impl AnswerRepository for InMemorySurveyStore {
    async fn append(
        &self,
        survey_code_id: &SurveyCodeId,
        question_id: QuestionId,
        value: &AnswerValue,
    ) -> Result<SurveyAnswer, DomainError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "injected append failure",
            ));
        }
        let mut state = self.state.lock().expect("survey store lock poisoned");
        Self::check_appendable(&state, survey_code_id)?;
        let answer = SurveyAnswer::new(*survey_code_id, question_id, value);
        state.answers.push(answer.clone());
        Ok(answer)
    }

    async fn append_all(
        &self,
        survey_code_id: &SurveyCodeId,
        values: &[(QuestionId, AnswerValue)],
    ) -> Result<(), DomainError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "injected append failure",
            ));
        }
        let mut state = self.state.lock().expect("survey store lock poisoned");
        Self::check_appendable(&state, survey_code_id)?;
        for (question_id, value) in values {
            let answer = SurveyAnswer::new(*survey_code_id, *question_id, value);
            state.answers.push(answer);
        }
        Ok(())
    }

    async fn fetch_all(
        &self,
        survey_code_id: &SurveyCodeId,
    ) -> Result<Vec<SurveyAnswer>, DomainError> {
        let state = self.state.lock().expect("survey store lock poisoned");
        let mut answers: Vec<SurveyAnswer> = state
            .answers
            .iter()
            .filter(|a| a.survey_code_id() == survey_code_id)
            .cloned()
            .collect();
        answers.sort_by_key(|a| *a.timestamp());
        Ok(answers)
    }
}

#[async_trait]
impl ResponseReader for InMemorySurveyStore {
    async fn fetch_all_responses(&self) -> Result<Vec<CodeResponse>, DomainError> {
        let state = self.state.lock().expect("survey store lock poisoned");
        let mut responses: Vec<CodeResponse> = state
            .codes
            .values()
            .map(|code| assemble(code, &state.answers))
            .collect();
        responses.sort_by_key(|r| r.token.as_str().to_string());
        Ok(responses)
    }

    async fn fetch_response(
        &self,
        token: &CodeToken,
    ) -> Result<Option<CodeResponse>, DomainError> {
        let state = self.state.lock().expect("survey store lock poisoned");
        Ok(state
            .codes
            .get(token.as_str())
            .map(|code| assemble(code, &state.answers)))
    }
}

fn assemble(code: &SurveyCode, all_answers: &[SurveyAnswer]) -> CodeResponse {
    let mut answers: Vec<SurveyAnswer> = all_answers
        .iter()
        .filter(|a| a.survey_code_id() == code.id())
        .cloned()
        .collect();
    answers.sort_by_key(|a| *a.timestamp());
    CodeResponse {
        survey_code_id: *code.id(),
        token: code.token().clone(),
        name: code.name().to_string(),
        project_id: *code.project_id(),
        service_type: code.service_type(),
        language: code.language().clone(),
        scopes: code.scopes().to_vec(),
        started_at: code.started_at().copied(),
        completed_at: code.completed_at().copied(),
        answers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::code::{Language, Scope, ServiceType};
    use crate::domain::foundation::ProjectId;
    use std::sync::Arc;

    fn store_with_code(token: &str) -> (Arc<InMemorySurveyStore>, SurveyCode) {
        let store = Arc::new(InMemorySurveyStore::new());
        let code = SurveyCode::new(
            SurveyCodeId::new(),
            CodeToken::parse(token).unwrap(),
            "Test Client".to_string(),
            "client@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Experience,
            Language::default(),
            vec![Scope::Tech],
        )
        .unwrap();
        (store, code)
    }

    #[tokio::test]
    async fn save_rejects_duplicate_tokens() {
        let (store, code) = store_with_code("ABC23456");
        store.save(&code).await.unwrap();
        assert!(store.save(&code).await.is_err());
    }

    #[tokio::test]
    async fn activate_twice_keeps_first_timestamp() {
        let (store, code) = store_with_code("ABC23456");
        store.save(&code).await.unwrap();

        let first = store.activate(code.token()).await.unwrap();
        let second = store.activate(code.token()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn concurrent_activation_converges_on_one_timestamp() {
        let (store, code) = store_with_code("ABC12345");
        store.save(&code).await.unwrap();

        let token = code.token().clone();
        let (a, b) = tokio::join!(
            store.activate(&token),
            store.activate(&token),
        );
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[tokio::test]
    async fn complete_is_idempotent() {
        let (store, code) = store_with_code("ABC23456");
        store.save(&code).await.unwrap();
        store.activate(code.token()).await.unwrap();

        let first = store.complete(code.token()).await.unwrap();
        let second = store.complete(code.token()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn append_refused_for_completed_code() {
        let (store, code) = store_with_code("ABC23456");
        store.save(&code).await.unwrap();
        store.activate(code.token()).await.unwrap();
        store.complete(code.token()).await.unwrap();

        let err = store
            .append(code.id(), QuestionId::RecommendScore, &AnswerValue::Score(9))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CodeAlreadyCompleted);
    }

    #[tokio::test]
    async fn fetch_all_orders_by_timestamp() {
        let (store, code) = store_with_code("ABC23456");
        store.save(&code).await.unwrap();

        store
            .append(code.id(), QuestionId::RecommendScore, &AnswerValue::Score(4))
            .await
            .unwrap();
        store
            .append(code.id(), QuestionId::RecommendScore, &AnswerValue::Score(9))
            .await
            .unwrap();

        let answers = store.fetch_all(code.id()).await.unwrap();
        assert_eq!(answers.len(), 2);
        assert!(answers[0].timestamp() <= answers[1].timestamp());
        assert_eq!(answers[1].answer(), "9");
    }
}
