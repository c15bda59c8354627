//! Segment reports over collected responses.

use serde::{Deserialize, Serialize};

use crate::domain::answer::{AnswerValue, QuestionId, SurveyAnswer};
use crate::domain::code::{CodeToken, Language, Scope, ServiceType};
use crate::domain::foundation::{ProjectId, SurveyCodeId, Timestamp};

use super::classify::{classify, CategoryCounts};

/// Read model: one code with everything it answered.
///
/// This is a snapshot assembled by the reader side; the aggregator only
/// ever computes over it, it never mutates shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeResponse {
    pub survey_code_id: SurveyCodeId,
    pub token: CodeToken,
    pub name: String,
    pub project_id: ProjectId,
    pub service_type: ServiceType,
    pub language: Language,
    pub scopes: Vec<Scope>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    /// Every recorded answer row, ordered by timestamp ascending.
    pub answers: Vec<SurveyAnswer>,
}

impl CodeResponse {
    /// Latest recorded row for a question (the log is append-only,
    /// latest wins for display).
    pub fn latest_answer(&self, question: QuestionId) -> Option<&SurveyAnswer> {
        self.answers
            .iter()
            .filter(|a| a.question_id() == question)
            .max_by_key(|a| *a.timestamp())
    }

    /// Decoded latest value for a question.
    pub fn latest_value(&self, question: QuestionId) -> Option<AnswerValue> {
        self.latest_answer(question).and_then(|a| a.decoded())
    }

    /// Numeric score for a question; `None` when missing or malformed,
    /// which excludes the respondent from that metric's total.
    pub fn numeric_answer(&self, question: QuestionId) -> Option<i32> {
        self.latest_value(question).and_then(|v| v.as_score())
    }
}

/// Aggregate result for one population segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentReport {
    pub nps: i32,
    pub counts: CategoryCounts,
    /// Respondents with a well-formed numeric answer for the metric
    /// question; malformed and missing answers are not counted.
    pub total: usize,
}

/// Filters responses by a predicate, extracts the metric question's
/// score from each, and reduces to an NPS segment report.
pub fn segment<'a, I, P>(responses: I, predicate: P, question: QuestionId) -> SegmentReport
where
    I: IntoIterator<Item = &'a CodeResponse>,
    P: Fn(&CodeResponse) -> bool,
{
    let mut counts = CategoryCounts::default();
    for response in responses {
        if !predicate(response) {
            continue;
        }
        if let Some(score) = response.numeric_answer(question) {
            counts.add(classify(score));
        }
    }
    SegmentReport {
        nps: counts.nps(),
        counts,
        total: counts.total(),
    }
}
