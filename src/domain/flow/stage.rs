//! Stage descriptors - per-step validation and commit targets.
//!
//! Each interactive step is described once, as data: which question it
//! commits and what input it accepts. A single generic advance routine
//! (`SurveySession::advance`) drives the whole flow off this table, so
//! sequencing logic is never re-derived per screen.

use crate::domain::answer::{AnswerValue, QuestionId, QuestionKind};
use crate::domain::foundation::ValidationError;

use super::SurveyStep;

/// The user action submitted for a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepInput {
    /// Start the survey from the welcome step.
    Begin,
    /// A selected score (selection is commitment, no confirm step).
    Score(i32),
    /// Free text.
    Text(String),
    /// A boolean choice.
    Choice(bool),
    /// Explicit submit on the summary step.
    Submit,
}

/// Description of one interactive step.
#[derive(Debug, Clone, Copy)]
pub struct StageDescriptor {
    pub step: SurveyStep,
    /// Question committed when the step completes; None for steps that
    /// gather no answer (welcome, summary).
    pub commit_question: Option<QuestionId>,
}

/// All interactive stages in forward order. Terminal steps have no
/// descriptor; they accept no input.
pub const STAGES: [StageDescriptor; 7] = [
    StageDescriptor {
        step: SurveyStep::Welcome,
        commit_question: None,
    },
    StageDescriptor {
        step: SurveyStep::Recommend,
        commit_question: Some(QuestionId::RecommendScore),
    },
    StageDescriptor {
        step: SurveyStep::Reason,
        commit_question: Some(QuestionId::RecommendReason),
    },
    StageDescriptor {
        step: SurveyStep::Rehire,
        commit_question: Some(QuestionId::RehireScore),
    },
    StageDescriptor {
        step: SurveyStep::Testimonial,
        commit_question: Some(QuestionId::Testimonial),
    },
    StageDescriptor {
        step: SurveyStep::Publish,
        commit_question: Some(QuestionId::CanPublish),
    },
    StageDescriptor {
        step: SurveyStep::Summary,
        commit_question: None,
    },
];

/// Looks up the descriptor for a step, if it is an interactive one.
pub fn stage_for(step: SurveyStep) -> Option<&'static StageDescriptor> {
    STAGES.iter().find(|s| s.step == step)
}

impl StageDescriptor {
    /// Validates the input against this stage, producing the value to
    /// commit (if the stage commits one).
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `OutOfRange` when a required answer is missing
    ///   or out of bounds
    /// - `InvalidFormat` when the input kind does not fit the stage
    pub fn validate(&self, input: &StepInput) -> Result<Option<AnswerValue>, ValidationError> {
        match (self.commit_question, input) {
            (None, StepInput::Begin) if self.step == SurveyStep::Welcome => Ok(None),
            (None, StepInput::Submit) if self.step == SurveyStep::Summary => Ok(None),
            (Some(question), input) => {
                let value = match (question.kind(), input) {
                    (QuestionKind::Score, StepInput::Score(n)) => AnswerValue::score(*n)?,
                    (QuestionKind::Text, StepInput::Text(s)) => {
                        AnswerValue::text(question.as_str(), s)?
                    }
                    (QuestionKind::Flag, StepInput::Choice(b)) => AnswerValue::flag(*b),
                    _ => {
                        return Err(ValidationError::invalid_format(
                            question.as_str(),
                            format!("input does not fit step '{}'", self.step),
                        ))
                    }
                };
                Ok(Some(value))
            }
            _ => Err(ValidationError::invalid_format(
                "input",
                format!("input does not fit step '{}'", self.step),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_interactive_step_has_a_stage() {
        for step in SurveyStep::ORDER.iter().take(7) {
            assert!(stage_for(*step).is_some(), "{:?} needs a stage", step);
        }
        assert!(stage_for(SurveyStep::ThankYou).is_none());
        assert!(stage_for(SurveyStep::CodeUsed).is_none());
    }

    #[test]
    fn score_stage_accepts_bounds_and_rejects_outside() {
        let stage = stage_for(SurveyStep::Recommend).unwrap();
        assert_eq!(
            stage.validate(&StepInput::Score(10)).unwrap(),
            Some(AnswerValue::Score(10))
        );
        assert!(stage.validate(&StepInput::Score(0)).is_err());
        assert!(stage.validate(&StepInput::Score(11)).is_err());
    }

    #[test]
    fn text_stage_rejects_blank_text() {
        let stage = stage_for(SurveyStep::Reason).unwrap();
        assert!(stage.validate(&StepInput::Text("  ".into())).is_err());
        assert_eq!(
            stage.validate(&StepInput::Text(" blazing fast ".into())).unwrap(),
            Some(AnswerValue::Text("blazing fast".into()))
        );
    }

    #[test]
    fn mismatched_input_kind_is_rejected() {
        let stage = stage_for(SurveyStep::Publish).unwrap();
        assert!(stage.validate(&StepInput::Score(5)).is_err());
        assert_eq!(
            stage.validate(&StepInput::Choice(true)).unwrap(),
            Some(AnswerValue::Flag(true))
        );
    }

    #[test]
    fn welcome_and_summary_commit_nothing() {
        let welcome = stage_for(SurveyStep::Welcome).unwrap();
        assert_eq!(welcome.validate(&StepInput::Begin).unwrap(), None);
        assert!(welcome.validate(&StepInput::Submit).is_err());

        let summary = stage_for(SurveyStep::Summary).unwrap();
        assert_eq!(summary.validate(&StepInput::Submit).unwrap(), None);
        assert!(summary.validate(&StepInput::Begin).is_err());
    }
}
