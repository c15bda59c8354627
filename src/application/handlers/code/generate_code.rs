//! GenerateCodeHandler - Command handler for issuing survey access codes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::SurveyConfig;
use crate::domain::code::{
    events, CodeGenerator, Language, Scope, ServiceType, SurveyCode,
};
use crate::domain::foundation::{DomainError, ErrorCode, ProjectId, SurveyCodeId};
use crate::ports::{CodeRepository, EventPublisher};

/// Command to generate one survey access code for a recipient.
#[derive(Debug, Clone)]
pub struct GenerateCodeCommand {
    pub name: String,
    pub email: String,
    pub project_id: ProjectId,
    pub service_type: ServiceType,
    pub language: Language,
    pub scopes: Vec<Scope>,
}

/// Handler for generating unique survey codes.
pub struct GenerateCodeHandler {
    repository: Arc<dyn CodeRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    generator: CodeGenerator,
    max_retries: u32,
}

impl GenerateCodeHandler {
    pub fn new(
        repository: Arc<dyn CodeRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        config: &SurveyConfig,
    ) -> Self {
        Self {
            repository,
            event_publisher,
            generator: CodeGenerator::new(config.code_length),
            max_retries: config.max_generation_retries,
        }
    }

    /// Generates a token nobody holds yet, persists the code, and
    /// publishes `code.generated.v1`.
    ///
    /// Uniqueness is rechecked against the store on every draw; after
    /// `max_retries` collisions the handler gives up rather than loop.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for a bad name or email
    /// - `GenerationExhausted` if no free token was found
    /// - `DatabaseError` on persistence failure
    pub async fn handle(&self, cmd: GenerateCodeCommand) -> Result<SurveyCode, DomainError> {
        let token = {
            let mut found = None;
            for attempt in 0..=self.max_retries {
                let candidate = self.generator.generate();
                if !self.repository.token_exists(&candidate).await? {
                    found = Some(candidate);
                    break;
                }
                warn!(attempt, "generated code collided, retrying");
            }
            found.ok_or_else(|| {
                DomainError::new(
                    ErrorCode::GenerationExhausted,
                    format!(
                        "No unique code found after {} attempts",
                        self.max_retries + 1
                    ),
                )
            })?
        };

        let survey_code = SurveyCode::new(
            SurveyCodeId::new(),
            token,
            cmd.name,
            cmd.email,
            cmd.project_id,
            cmd.service_type,
            cmd.language,
            cmd.scopes,
        )?;

        self.repository.save(&survey_code).await?;
        debug!(code = %survey_code.token(), "survey code generated");

        self.event_publisher
            .publish(events::code_generated(&survey_code))
            .await?;

        Ok(survey_code)
    }
}
