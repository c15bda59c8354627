//! AdvanceStepHandler - Drives one forward step of a survey session.

use std::sync::Arc;

use tracing::warn;

use crate::domain::flow::{Advance, StepInput, SurveySession};
use crate::domain::foundation::DomainError;
use crate::ports::AnswerRepository;

use super::ActivateCodeHandler;

/// Handler that applies a step input and performs the side writes.
///
/// The domain session decides whether the input is valid and where it
/// leads; this handler performs the incremental persistence around it.
/// Activation and per-step answer rows are best effort: a failed write
/// is logged and never blocks navigation, because submit re-sends the
/// full answer snapshot anyway.
pub struct AdvanceStepHandler {
    activation: Arc<ActivateCodeHandler>,
    answers: Arc<dyn AnswerRepository>,
}

impl AdvanceStepHandler {
    pub fn new(activation: Arc<ActivateCodeHandler>, answers: Arc<dyn AnswerRepository>) -> Self {
        Self { activation, answers }
    }

    /// # Errors
    ///
    /// - validation errors from the step's stage, session unchanged
    /// - `InvalidStateTransition` when the current step accepts no input
    pub async fn handle(
        &self,
        session: &mut SurveySession,
        input: &StepInput,
    ) -> Result<Advance, DomainError> {
        let advance = session.advance(input)?;
        let token = session.code().token().clone();

        if advance.activated {
            if let Err(err) = self.activation.handle(&token).await {
                warn!(code = %token, error = %err, "code activation write failed");
            }
        }

        if let Some((question, value)) = &advance.commit {
            let id = *session.code().id();
            if let Err(err) = self.answers.append(&id, *question, value).await {
                warn!(code = %token, question = %question.as_str(), error = %err,
                    "incremental answer write failed");
            }
        }

        Ok(advance)
    }
}
