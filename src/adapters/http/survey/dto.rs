//! HTTP DTOs for the public survey endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::answer::{AnswerValue, QuestionId, QuestionKind, SurveyAnswer};
use crate::domain::code::{Language, Scope, ServiceType, SurveyCode};
use crate::domain::foundation::{DomainError, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One answer on the wire: the question id and a value of the
/// question's kind (number, string, or boolean).
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerPayload {
    pub question_id: String,
    pub answer: Value,
}

impl AnswerPayload {
    /// Resolves the payload against the questionnaire.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` for an unknown question id
    /// - validation errors when the value does not fit the question
    pub fn resolve(&self) -> Result<(QuestionId, AnswerValue), DomainError> {
        let question: QuestionId = self.question_id.parse()?;
        let value = match (question.kind(), &self.answer) {
            (QuestionKind::Score, Value::Number(n)) => {
                let score = n.as_i64().unwrap_or(-1);
                AnswerValue::score(score as i32)?
            }
            (QuestionKind::Text, Value::String(s)) => AnswerValue::text(question.as_str(), s)?,
            (QuestionKind::Flag, Value::Bool(b)) => AnswerValue::flag(*b),
            _ => {
                return Err(DomainError::validation(
                    question.as_str(),
                    format!("value does not fit question '{}'", question.as_str()),
                ))
            }
        };
        Ok((question, value))
    }
}

/// Body of the final submission: the full answer snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteSurveyRequest {
    pub answers: Vec<AnswerPayload>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// What the survey UI needs to render a code's flow.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyCodeResponse {
    pub code: String,
    pub name: String,
    pub service_type: ServiceType,
    pub language: Language,
    pub scopes: Vec<Scope>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl From<&SurveyCode> for SurveyCodeResponse {
    fn from(code: &SurveyCode) -> Self {
        Self {
            code: code.token().to_string(),
            name: code.name().to_string(),
            service_type: code.service_type(),
            language: code.language().clone(),
            scopes: code.scopes().to_vec(),
            started_at: code.started_at().copied(),
            completed_at: code.completed_at().copied(),
        }
    }
}

/// Result of the activation write.
#[derive(Debug, Clone, Serialize)]
pub struct ActivateResponse {
    pub started_at: Timestamp,
}

/// One stored answer row.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub question_id: String,
    pub answer: String,
    pub timestamp: Timestamp,
}

impl From<&SurveyAnswer> for AnswerResponse {
    fn from(answer: &SurveyAnswer) -> Self {
        Self {
            question_id: answer.question_id().as_str().to_string(),
            answer: answer.answer().to_string(),
            timestamp: *answer.timestamp(),
        }
    }
}

/// Result of the final submission.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteResponse {
    pub completed_at: Timestamp,
}
