//! PostgreSQL implementation of CodeRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::code::{CodeToken, Language, Scope, ServiceType, SurveyCode};
use crate::domain::foundation::{
    DomainError, ErrorCode, ProjectId, SurveyCodeId, Timestamp,
};
use crate::ports::CodeRepository;

/// PostgreSQL implementation of CodeRepository.
///
/// The lifecycle updates are single conditional statements: the row
/// lock taken by `UPDATE` is what arbitrates concurrent activations,
/// the adapter never reads before writing.
#[derive(Clone)]
pub struct PostgresCodeRepository {
    pool: PgPool,
}

impl PostgresCodeRepository {
    /// Creates a new PostgresCodeRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Distinguishes not-found from lifecycle conflicts after a
    /// conditional update touched no rows.
    async fn lifecycle_conflict(
        &self,
        token: &CodeToken,
        when_completed: ErrorCode,
    ) -> DomainError {
        let row = sqlx::query(
            "SELECT started_at, completed_at FROM survey_codes WHERE code = $1",
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await;

        match row {
            Ok(Some(row)) => {
                let completed: Option<chrono::DateTime<chrono::Utc>> =
                    row.try_get("completed_at").unwrap_or(None);
                if completed.is_some() {
                    DomainError::new(
                        when_completed,
                        format!("Code {} is already completed", token),
                    )
                } else {
                    DomainError::new(
                        ErrorCode::CodeNotStarted,
                        format!("Code {} was never activated", token),
                    )
                }
            }
            Ok(None) => DomainError::code_not_found(token),
            Err(e) => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to inspect code lifecycle: {}", e),
            ),
        }
    }
}

#[async_trait]
impl CodeRepository for PostgresCodeRepository {
    async fn save(&self, code: &SurveyCode) -> Result<(), DomainError> {
        let scopes: Vec<String> = code.scopes().iter().map(|s| s.to_string()).collect();

        sqlx::query(
            r#"
            INSERT INTO survey_codes (
                id, code, name, email, project_id, service_type,
                language, scopes, generated_at, started_at, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NULL, NULL)
            "#,
        )
        .bind(code.id().as_uuid())
        .bind(code.token().as_str())
        .bind(code.name())
        .bind(code.email())
        .bind(code.project_id().as_uuid())
        .bind(code.service_type().as_str())
        .bind(code.language().as_str())
        .bind(&scopes)
        .bind(code.generated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert survey code: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_token(
        &self,
        token: &CodeToken,
    ) -> Result<Option<SurveyCode>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, code, name, email, project_id, service_type,
                   language, scopes, generated_at, started_at, completed_at
            FROM survey_codes
            WHERE code = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch survey code: {}", e),
            )
        })?;

        row.map(row_to_code).transpose()
    }

    async fn token_exists(&self, token: &CodeToken) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 AS one FROM survey_codes WHERE code = $1")
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to probe code uniqueness: {}", e),
                )
            })?;
        Ok(row.is_some())
    }

    async fn activate(&self, token: &CodeToken) -> Result<Timestamp, DomainError> {
        // Atomic compare-and-set: COALESCE keeps an existing timestamp,
        // so concurrent activations converge on one value.
        let row = sqlx::query(
            r#"
            UPDATE survey_codes
            SET started_at = COALESCE(started_at, now())
            WHERE code = $1 AND completed_at IS NULL
            RETURNING started_at
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to activate code: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let started: chrono::DateTime<chrono::Utc> =
                    row.try_get("started_at").map_err(db_column_error)?;
                Ok(Timestamp::from_datetime(started))
            }
            None => Err(self
                .lifecycle_conflict(token, ErrorCode::CodeAlreadyCompleted)
                .await),
        }
    }

    async fn complete(&self, token: &CodeToken) -> Result<Timestamp, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE survey_codes
            SET completed_at = COALESCE(completed_at, now())
            WHERE code = $1 AND started_at IS NOT NULL
            RETURNING completed_at
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to complete code: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let completed: chrono::DateTime<chrono::Utc> =
                    row.try_get("completed_at").map_err(db_column_error)?;
                Ok(Timestamp::from_datetime(completed))
            }
            None => Err(self
                .lifecycle_conflict(token, ErrorCode::CodeNotStarted)
                .await),
        }
    }
}

fn db_column_error(e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Unexpected column shape: {}", e),
    )
}

/// Maps a survey_codes row to the aggregate.
pub(crate) fn row_to_code(row: sqlx::postgres::PgRow) -> Result<SurveyCode, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(db_column_error)?;
    let code: String = row.try_get("code").map_err(db_column_error)?;
    let name: String = row.try_get("name").map_err(db_column_error)?;
    let email: String = row.try_get("email").map_err(db_column_error)?;
    let project_id: uuid::Uuid = row.try_get("project_id").map_err(db_column_error)?;
    let service_type: String = row.try_get("service_type").map_err(db_column_error)?;
    let language: String = row.try_get("language").map_err(db_column_error)?;
    let scopes: Vec<String> = row.try_get("scopes").map_err(db_column_error)?;
    let generated_at: chrono::DateTime<chrono::Utc> =
        row.try_get("generated_at").map_err(db_column_error)?;
    let started_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("started_at").map_err(db_column_error)?;
    let completed_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("completed_at").map_err(db_column_error)?;

    let token = CodeToken::parse(&code)
        .map_err(|e| DomainError::new(ErrorCode::InvalidFormat, e.to_string()))?;
    let service_type: ServiceType = service_type
        .parse()
        .map_err(|e: crate::domain::foundation::ValidationError| {
            DomainError::new(ErrorCode::InvalidFormat, e.to_string())
        })?;
    let scopes = scopes
        .iter()
        .filter_map(|s| s.parse::<Scope>().ok())
        .collect();

    Ok(SurveyCode::reconstitute(
        SurveyCodeId::from_uuid(id),
        token,
        name,
        email,
        ProjectId::from_uuid(project_id),
        service_type,
        Language::new(language),
        scopes,
        Timestamp::from_datetime(generated_at),
        started_at.map(Timestamp::from_datetime),
        completed_at.map(Timestamp::from_datetime),
    ))
}
