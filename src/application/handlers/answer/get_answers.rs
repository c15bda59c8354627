//! GetAnswersHandler - Full answer timeline for one code.

use std::sync::Arc;

use crate::domain::code::CodeToken;
use crate::domain::foundation::DomainError;
use crate::domain::reporting::CodeResponse;
use crate::ports::{ProjectLabel, ProjectReader, ResponseReader};

/// One code's response with its project labels resolved.
#[derive(Debug, Clone)]
pub struct CodeAnswersView {
    pub response: CodeResponse,
    pub project: Option<ProjectLabel>,
}

/// Handler for the admin answer timeline.
pub struct GetAnswersHandler {
    responses: Arc<dyn ResponseReader>,
    projects: Arc<dyn ProjectReader>,
}

impl GetAnswersHandler {
    pub fn new(responses: Arc<dyn ResponseReader>, projects: Arc<dyn ProjectReader>) -> Self {
        Self {
            responses,
            projects,
        }
    }

    /// # Errors
    ///
    /// - `CodeNotFound` for an unknown code
    /// - `DatabaseError` on read failure
    pub async fn handle(&self, token: &CodeToken) -> Result<CodeAnswersView, DomainError> {
        let response = self
            .responses
            .fetch_response(token)
            .await?
            .ok_or_else(|| DomainError::code_not_found(token))?;
        let project = self.projects.label(&response.project_id).await?;
        Ok(CodeAnswersView { response, project })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::domain::answer::{AnswerValue, QuestionId};
    use crate::domain::code::{Language, Scope, ServiceType, SurveyCode};
    use crate::domain::foundation::{ErrorCode, ProjectId, SurveyCodeId};
    use crate::ports::{AnswerRepository, CodeRepository};
    use async_trait::async_trait;

    struct StaticProjectReader(Option<ProjectLabel>);

    #[async_trait]
    impl ProjectReader for StaticProjectReader {
        async fn label(&self, _id: &ProjectId) -> Result<Option<ProjectLabel>, DomainError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn resolves_timeline_with_project_label() {
        let store = Arc::new(InMemorySurveyStore::new());
        let token = CodeToken::parse("TUVW2345").unwrap();
        let code = SurveyCode::new(
            SurveyCodeId::new(),
            token.clone(),
            "Dana Cole".to_string(),
            "dana@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Experience,
            Language::default(),
            vec![Scope::Design],
        )
        .unwrap();
        store.save(&code).await.unwrap();
        store
            .append(code.id(), QuestionId::RecommendScore, &AnswerValue::Score(8))
            .await
            .unwrap();

        let projects = Arc::new(StaticProjectReader(Some(ProjectLabel {
            project_name: "Website Relaunch".to_string(),
            company_name: "Acme GmbH".to_string(),
        })));
        let handler = GetAnswersHandler::new(store, projects);

        let view = handler.handle(&token).await.unwrap();
        assert_eq!(view.response.answers.len(), 1);
        assert_eq!(
            view.project.unwrap().company_name,
            "Acme GmbH"
        );
    }

    #[tokio::test]
    async fn unknown_code_is_rejected() {
        let store = Arc::new(InMemorySurveyStore::new());
        let projects = Arc::new(StaticProjectReader(None));
        let handler = GetAnswersHandler::new(store, projects);

        let err = handler
            .handle(&CodeToken::parse("NOPE2345").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CodeNotFound);
    }
}
