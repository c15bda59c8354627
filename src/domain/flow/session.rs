//! SurveySession - in-memory state of one respondent's survey run.
//!
//! The session is an explicit object passed by argument through the
//! flow handlers, never ambient shared state, so the machine is
//! testable without any UI attached.

use serde::{Deserialize, Serialize};

use crate::domain::answer::{AnswerValue, QuestionId};
use crate::domain::code::SurveyCode;
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};

use super::stage::{stage_for, StepInput};
use super::SurveyStep;

/// Draft answers held in memory while the survey is in progress.
///
/// Going back redisplays these values; they are re-committed only when
/// the user changes them, never on backward navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDraft {
    pub recommend_score: Option<u8>,
    pub recommend_reason: Option<String>,
    pub rehire_score: Option<u8>,
    pub testimonial: Option<String>,
    pub can_publish: Option<bool>,
}

impl SurveyDraft {
    /// Stores a committed value in its slot.
    pub fn apply(&mut self, question: QuestionId, value: &AnswerValue) {
        match (question, value) {
            (QuestionId::RecommendScore, AnswerValue::Score(s)) => {
                self.recommend_score = Some(*s)
            }
            (QuestionId::RecommendReason, AnswerValue::Text(t)) => {
                self.recommend_reason = Some(t.clone())
            }
            (QuestionId::RehireScore, AnswerValue::Score(s)) => self.rehire_score = Some(*s),
            (QuestionId::Testimonial, AnswerValue::Text(t)) => {
                self.testimonial = Some(t.clone())
            }
            (QuestionId::CanPublish, AnswerValue::Flag(b)) => self.can_publish = Some(*b),
            // kind mismatches cannot happen through stage validation
            _ => {}
        }
    }

    /// The stored value for a question, if answered.
    pub fn value_of(&self, question: QuestionId) -> Option<AnswerValue> {
        match question {
            QuestionId::RecommendScore => self.recommend_score.map(AnswerValue::Score),
            QuestionId::RecommendReason => {
                self.recommend_reason.clone().map(AnswerValue::Text)
            }
            QuestionId::RehireScore => self.rehire_score.map(AnswerValue::Score),
            QuestionId::Testimonial => self.testimonial.clone().map(AnswerValue::Text),
            QuestionId::CanPublish => self.can_publish.map(AnswerValue::Flag),
        }
    }

    /// All answered questions in survey order, for the final aggregate
    /// write at submit time.
    pub fn answered(&self) -> Vec<(QuestionId, AnswerValue)> {
        QuestionId::all()
            .into_iter()
            .filter_map(|q| self.value_of(q).map(|v| (q, v)))
            .collect()
    }
}

/// Outcome of one forward advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// The step the session moved to.
    pub step: SurveyStep,
    /// The answer to record, when the completed step commits one.
    pub commit: Option<(QuestionId, AnswerValue)>,
    /// True when leaving the welcome step for the first time, which is
    /// the moment the code gets activated.
    pub activated: bool,
}

/// In-memory state of one survey run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySession {
    code: SurveyCode,
    step: SurveyStep,
    draft: SurveyDraft,
}

impl SurveySession {
    /// Opens a session for a validated code.
    ///
    /// A completed code resolves to `CodeUsed` regardless of how or how
    /// often the flow is re-entered; everything else starts at Welcome.
    pub fn open(code: SurveyCode) -> Self {
        let step = if code.is_completed() {
            SurveyStep::CodeUsed
        } else {
            SurveyStep::Welcome
        };
        Self {
            code,
            step,
            draft: SurveyDraft::default(),
        }
    }

    pub fn code(&self) -> &SurveyCode {
        &self.code
    }

    pub fn step(&self) -> SurveyStep {
        self.step
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    /// Advances one step forward after validating the input.
    ///
    /// This is the single generic advance routine: the stage table
    /// decides what input is acceptable and which question the step
    /// commits. It covers Welcome through Publish; leaving Summary
    /// requires the completion gate (`finish`, driven by the submit
    /// handler).
    ///
    /// # Errors
    ///
    /// - validation errors from the stage, leaving the step unchanged
    /// - `InvalidStateTransition` from Summary or a terminal step
    pub fn advance(&mut self, input: &StepInput) -> Result<Advance, DomainError> {
        if self.step == SurveyStep::Summary {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Summary is left through submit, not advance",
            ));
        }
        let stage = stage_for(self.step).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Step '{}' accepts no input", self.step),
            )
        })?;

        // Validation failures surface inline and must not move the step.
        let value = stage.validate(input)?;

        // Entering a completed code's flow routes to CodeUsed instead
        // of activating (defense for stale sessions; open() normally
        // catches this earlier).
        if self.step == SurveyStep::Welcome && self.code.is_completed() {
            self.step = self.step.transition_to(SurveyStep::CodeUsed)?;
            return Ok(Advance {
                step: self.step,
                commit: None,
                activated: false,
            });
        }

        let activated = self.step == SurveyStep::Welcome;
        let next = self.step.next().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("No step after '{}'", self.step),
            )
        })?;
        self.step = self.step.transition_to(next)?;

        let commit = stage.commit_question.zip(value);
        if let Some((question, value)) = &commit {
            self.draft.apply(*question, value);
        }

        Ok(Advance {
            step: self.step,
            commit,
            activated,
        })
    }

    /// Navigates one step backward.
    ///
    /// Never re-validates or re-commits; the previously entered value
    /// stays in the draft for redisplay.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` from Welcome or a terminal step
    pub fn back(&mut self) -> Result<SurveyStep, DomainError> {
        if !self.step.allows_back() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot navigate back from '{}'", self.step),
            ));
        }
        let prev = self.step.prev().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("No step before '{}'", self.step),
            )
        })?;
        self.step = self.step.transition_to(prev)?;
        Ok(self.step)
    }

    /// Moves Summary -> ThankYou after the completion write succeeded.
    ///
    /// The submit handler calls this only once `complete` and the final
    /// aggregate write are durable; on any failure the session stays on
    /// Summary so the user can retry.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless currently on Summary
    pub fn finish(&mut self) -> Result<(), DomainError> {
        if self.step != SurveyStep::Summary {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot submit from '{}'", self.step),
            ));
        }
        self.step = self.step.transition_to(SurveyStep::ThankYou)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::code::{CodeToken, Language, Scope, ServiceType};
    use crate::domain::foundation::{ProjectId, SurveyCodeId, Timestamp};

    fn fresh_code() -> SurveyCode {
        SurveyCode::new(
            SurveyCodeId::new(),
            CodeToken::parse("ABC23456").unwrap(),
            "Joana Silva".to_string(),
            "joana@example.com".to_string(),
            ProjectId::new(),
            ServiceType::Experience,
            Language::default(),
            vec![Scope::Design],
        )
        .unwrap()
    }

    fn completed_code() -> SurveyCode {
        let mut code = fresh_code();
        code.start(Timestamp::now()).unwrap();
        code.complete(Timestamp::now()).unwrap();
        code
    }

    fn walk_to_summary(session: &mut SurveySession) {
        session.advance(&StepInput::Begin).unwrap();
        session.advance(&StepInput::Score(9)).unwrap();
        session
            .advance(&StepInput::Text("great partnership".into()))
            .unwrap();
        session.advance(&StepInput::Score(10)).unwrap();
        session
            .advance(&StepInput::Text("would recommend to anyone".into()))
            .unwrap();
        session.advance(&StepInput::Choice(true)).unwrap();
    }

    #[test]
    fn fresh_code_opens_on_welcome() {
        let session = SurveySession::open(fresh_code());
        assert_eq!(session.step(), SurveyStep::Welcome);
    }

    #[test]
    fn completed_code_opens_on_code_used() {
        let session = SurveySession::open(completed_code());
        assert_eq!(session.step(), SurveyStep::CodeUsed);
    }

    #[test]
    fn begin_reports_activation() {
        let mut session = SurveySession::open(fresh_code());
        let advance = session.advance(&StepInput::Begin).unwrap();
        assert!(advance.activated);
        assert_eq!(advance.step, SurveyStep::Recommend);
        assert_eq!(advance.commit, None);
    }

    #[test]
    fn score_selection_commits_and_advances() {
        let mut session = SurveySession::open(fresh_code());
        session.advance(&StepInput::Begin).unwrap();

        let advance = session.advance(&StepInput::Score(9)).unwrap();
        assert_eq!(advance.step, SurveyStep::Reason);
        assert_eq!(
            advance.commit,
            Some((QuestionId::RecommendScore, AnswerValue::Score(9)))
        );
        assert_eq!(session.draft().recommend_score, Some(9));
    }

    #[test]
    fn invalid_input_keeps_step() {
        let mut session = SurveySession::open(fresh_code());
        session.advance(&StepInput::Begin).unwrap();

        assert!(session.advance(&StepInput::Score(11)).is_err());
        assert_eq!(session.step(), SurveyStep::Recommend);

        session.advance(&StepInput::Score(8)).unwrap();
        assert!(session.advance(&StepInput::Text("   ".into())).is_err());
        assert_eq!(session.step(), SurveyStep::Reason);
    }

    #[test]
    fn back_redisplays_draft_without_recommit() {
        let mut session = SurveySession::open(fresh_code());
        session.advance(&StepInput::Begin).unwrap();
        session.advance(&StepInput::Score(7)).unwrap();

        assert_eq!(session.back().unwrap(), SurveyStep::Recommend);
        assert_eq!(session.draft().recommend_score, Some(7));

        // changing the answer re-commits the new value
        let advance = session.advance(&StepInput::Score(9)).unwrap();
        assert_eq!(
            advance.commit,
            Some((QuestionId::RecommendScore, AnswerValue::Score(9)))
        );
        assert_eq!(session.draft().recommend_score, Some(9));
    }

    #[test]
    fn back_is_rejected_at_edges() {
        let mut session = SurveySession::open(fresh_code());
        assert!(session.back().is_err());

        let mut used = SurveySession::open(completed_code());
        assert!(used.back().is_err());
        assert!(used.advance(&StepInput::Begin).is_err());
    }

    #[test]
    fn full_walk_reaches_summary_with_complete_draft() {
        let mut session = SurveySession::open(fresh_code());
        walk_to_summary(&mut session);

        assert_eq!(session.step(), SurveyStep::Summary);
        let answered = session.draft().answered();
        assert_eq!(answered.len(), 5);
        assert_eq!(answered[0].0, QuestionId::RecommendScore);
        assert_eq!(answered[4].0, QuestionId::CanPublish);
    }

    #[test]
    fn finish_only_from_summary() {
        let mut session = SurveySession::open(fresh_code());
        assert!(session.finish().is_err());

        walk_to_summary(&mut session);
        session.finish().unwrap();
        assert_eq!(session.step(), SurveyStep::ThankYou);

        // terminal: nothing moves anymore
        assert!(session.finish().is_err());
        assert!(session.back().is_err());
        assert!(session.advance(&StepInput::Begin).is_err());
    }

    #[test]
    fn summary_refuses_generic_advance() {
        let mut session = SurveySession::open(fresh_code());
        walk_to_summary(&mut session);
        assert!(session.advance(&StepInput::Submit).is_err());
        assert_eq!(session.step(), SurveyStep::Summary);
    }
}
