//! PostgreSQL implementation of AnswerRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::answer::{AnswerValue, QuestionId, SurveyAnswer};
use crate::domain::foundation::{
    AnswerId, DomainError, ErrorCode, SurveyCodeId, Timestamp,
};
use crate::ports::AnswerRepository;

/// PostgreSQL implementation of AnswerRepository.
///
/// The insert is guarded against completed codes in the same
/// statement, mirroring the repository contract.
#[derive(Clone)]
pub struct PostgresAnswerRepository {
    pool: PgPool,
}

impl PostgresAnswerRepository {
    /// Creates a new PostgresAnswerRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn classify_rejection(&self, survey_code_id: &SurveyCodeId) -> DomainError {
        let row = sqlx::query("SELECT completed_at FROM survey_codes WHERE id = $1")
            .bind(survey_code_id.as_uuid())
            .fetch_optional(&self.pool)
            .await;

        match row {
            Ok(Some(_)) => DomainError::new(
                ErrorCode::CodeAlreadyCompleted,
                format!("Code {} no longer accepts answers", survey_code_id),
            ),
            Ok(None) => DomainError::new(
                ErrorCode::CodeNotFound,
                format!("Survey code not found: {}", survey_code_id),
            ),
            Err(e) => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to inspect code: {}", e),
            ),
        }
    }
}

#[async_trait]
impl AnswerRepository for PostgresAnswerRepository {
    async fn append(
        &self,
        survey_code_id: &SurveyCodeId,
        question_id: QuestionId,
        value: &AnswerValue,
    ) -> Result<SurveyAnswer, DomainError> {
        let answer = SurveyAnswer::new(*survey_code_id, question_id, value);

        let result = sqlx::query(
            r#"
            INSERT INTO survey_answers (id, survey_code_id, question_id, answer, timestamp)
            SELECT $1, c.id, $3, $4, $5
            FROM survey_codes c
            WHERE c.id = $2 AND c.completed_at IS NULL
            "#,
        )
        .bind(answer.id().as_uuid())
        .bind(survey_code_id.as_uuid())
        .bind(question_id.as_str())
        .bind(answer.answer())
        .bind(answer.timestamp().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to append answer: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(self.classify_rejection(survey_code_id).await);
        }

        Ok(answer)
    }

    async fn append_all(
        &self,
        survey_code_id: &SurveyCodeId,
        values: &[(QuestionId, AnswerValue)],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to open transaction: {}", e),
            )
        })?;

        for (question_id, value) in values {
            let answer = SurveyAnswer::new(*survey_code_id, *question_id, value);
            let result = sqlx::query(
                r#"
                INSERT INTO survey_answers (id, survey_code_id, question_id, answer, timestamp)
                SELECT $1, c.id, $3, $4, $5
                FROM survey_codes c
                WHERE c.id = $2 AND c.completed_at IS NULL
                "#,
            )
            .bind(answer.id().as_uuid())
            .bind(survey_code_id.as_uuid())
            .bind(question_id.as_str())
            .bind(answer.answer())
            .bind(answer.timestamp().as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to append answer batch: {}", e),
                )
            })?;

            if result.rows_affected() == 0 {
                // rollback happens on drop
                return Err(self.classify_rejection(survey_code_id).await);
            }
        }

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit answer batch: {}", e),
            )
        })
    }

    async fn fetch_all(
        &self,
        survey_code_id: &SurveyCodeId,
    ) -> Result<Vec<SurveyAnswer>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, survey_code_id, question_id, answer, timestamp
            FROM survey_answers
            WHERE survey_code_id = $1
            ORDER BY timestamp ASC
            "#,
        )
        .bind(survey_code_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch answers: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_answer).collect()
    }
}

/// Maps a survey_answers row to the domain record.
///
/// Rows with an unknown question_id are surfaced as errors rather than
/// skipped here; reporting-side exclusion applies only to malformed
/// answer values, not to foreign rows.
pub(crate) fn row_to_answer(row: sqlx::postgres::PgRow) -> Result<SurveyAnswer, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(db_error)?;
    let survey_code_id: uuid::Uuid = row.try_get("survey_code_id").map_err(db_error)?;
    let question_id: String = row.try_get("question_id").map_err(db_error)?;
    let answer: String = row.try_get("answer").map_err(db_error)?;
    let timestamp: chrono::DateTime<chrono::Utc> =
        row.try_get("timestamp").map_err(db_error)?;

    let question_id: QuestionId = question_id
        .parse()
        .map_err(|e: crate::domain::foundation::ValidationError| {
            DomainError::new(ErrorCode::InvalidFormat, e.to_string())
        })?;

    Ok(SurveyAnswer::reconstitute(
        AnswerId::from_uuid(id),
        SurveyCodeId::from_uuid(survey_code_id),
        question_id,
        answer,
        Timestamp::from_datetime(timestamp),
    ))
}

fn db_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Unexpected column shape: {}", e),
    )
}
