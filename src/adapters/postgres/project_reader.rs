//! PostgreSQL implementation of ProjectReader.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::ports::{ProjectLabel, ProjectReader};

/// PostgreSQL implementation of ProjectReader.
#[derive(Clone)]
pub struct PostgresProjectReader {
    pool: PgPool,
}

impl PostgresProjectReader {
    /// Creates a new PostgresProjectReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectReader for PostgresProjectReader {
    async fn label(&self, project_id: &ProjectId) -> Result<Option<ProjectLabel>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT p.name AS project_name, c.name AS company_name
            FROM projects p
            JOIN companies c ON c.id = p.company_id
            WHERE p.id = $1
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch project label: {}", e),
            )
        })?;

        match row {
            Some(row) => {
                let project_name: String = row.try_get("project_name").map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Unexpected column shape: {}", e),
                    )
                })?;
                let company_name: String = row.try_get("company_name").map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Unexpected column shape: {}", e),
                    )
                })?;
                Ok(Some(ProjectLabel {
                    project_name,
                    company_name,
                }))
            }
            None => Ok(None),
        }
    }
}
