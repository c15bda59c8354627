//! Project reference data port.
//!
//! Projects and companies are external lookup tables; the core only
//! labels survey codes with them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ProjectId};

/// Display label for a project and its owning company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLabel {
    pub project_name: String,
    pub company_name: String,
}

/// Reader port for project/company reference data.
#[async_trait]
pub trait ProjectReader: Send + Sync {
    /// Label for a project, if it exists.
    async fn label(&self, project_id: &ProjectId) -> Result<Option<ProjectLabel>, DomainError>;
}
