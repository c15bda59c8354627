//! PostgreSQL implementation of ResponseReader.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::answer::SurveyAnswer;
use crate::domain::code::{CodeToken, SurveyCode};
use crate::domain::foundation::{DomainError, ErrorCode, SurveyCodeId};
use crate::domain::reporting::CodeResponse;
use crate::ports::ResponseReader;

use super::answer_repository::row_to_answer;
use super::code_repository::row_to_code;

/// PostgreSQL implementation of ResponseReader.
///
/// Fetches codes and answers separately and groups them in memory.
#[derive(Clone)]
pub struct PostgresResponseReader {
    pool: PgPool,
}

impl PostgresResponseReader {
    /// Creates a new PostgresResponseReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_codes(&self, token: Option<&CodeToken>) -> Result<Vec<SurveyCode>, DomainError> {
        let rows = match token {
            Some(token) => {
                sqlx::query(
                    r#"
                    SELECT id, code, name, email, project_id, service_type,
                           language, scopes, generated_at, started_at, completed_at
                    FROM survey_codes
                    WHERE code = $1
                    "#,
                )
                .bind(token.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, code, name, email, project_id, service_type,
                           language, scopes, generated_at, started_at, completed_at
                    FROM survey_codes
                    ORDER BY generated_at ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch survey codes: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_code).collect()
    }

    async fn fetch_answers_grouped(
        &self,
    ) -> Result<HashMap<SurveyCodeId, Vec<SurveyAnswer>>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, survey_code_id, question_id, answer, timestamp
            FROM survey_answers
            ORDER BY timestamp ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch answers: {}", e),
            )
        })?;

        let mut grouped: HashMap<SurveyCodeId, Vec<SurveyAnswer>> = HashMap::new();
        for row in rows {
            let answer = row_to_answer(row)?;
            grouped
                .entry(*answer.survey_code_id())
                .or_default()
                .push(answer);
        }
        Ok(grouped)
    }
}

fn assemble(code: SurveyCode, answers: Vec<SurveyAnswer>) -> CodeResponse {
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

#[async_trait]
impl ResponseReader for PostgresResponseReader {
    async fn fetch_all_responses(&self) -> Result<Vec<CodeResponse>, DomainError> {
        let codes = self.fetch_codes(None).await?;
        let mut grouped = self.fetch_answers_grouped().await?;

        Ok(codes
            .into_iter()
            .map(|code| {
                let answers = grouped.remove(code.id()).unwrap_or_default();
                assemble(code, answers)
            })
            .collect())
    }

    async fn fetch_response(
        &self,
        token: &CodeToken,
    ) -> Result<Option<CodeResponse>, DomainError> {
        let mut codes = self.fetch_codes(Some(token)).await?;
        let Some(code) = codes.pop() else {
            return Ok(None);
        };

        let rows = sqlx::query(
            r#"
            SELECT id, survey_code_id, question_id, answer, timestamp
            FROM survey_answers
            WHERE survey_code_id = $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(code.id().as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch answers: {}", e),
            )
        })?;

        let answers = rows
            .into_iter()
            .map(row_to_answer)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(assemble(code, answers)))
    }
}
