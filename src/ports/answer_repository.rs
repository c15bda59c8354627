//! Answer log repository port.

use async_trait::async_trait;

use crate::domain::answer::{AnswerValue, QuestionId, SurveyAnswer};
use crate::domain::foundation::{DomainError, SurveyCodeId};

/// Repository port for the append-only answer log.
///
/// Rows are only ever appended; a question answered twice produces two
/// timestamped rows and readers resolve latest-wins. As a hardening
/// guard, appends against a completed code are refused even though the
/// flow never issues them.
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Append one answer row.
    ///
    /// # Errors
    ///
    /// - `CodeNotFound` if the code row is missing
    /// - `CodeAlreadyCompleted` if the code is terminal
    /// - `DatabaseError` on persistence failure
    async fn append(
        &self,
        survey_code_id: &SurveyCodeId,
        question_id: QuestionId,
        value: &AnswerValue,
    ) -> Result<SurveyAnswer, DomainError>;

    /// Append a batch of answers (the final aggregate write at submit).
    ///
    /// Written in one transaction where the adapter supports it.
    async fn append_all(
        &self,
        survey_code_id: &SurveyCodeId,
        values: &[(QuestionId, AnswerValue)],
    ) -> Result<(), DomainError>;

    /// Every recorded answer for a code, ordered by timestamp
    /// ascending (the display timeline).
    async fn fetch_all(
        &self,
        survey_code_id: &SurveyCodeId,
    ) -> Result<Vec<SurveyAnswer>, DomainError>;
}
