//! GetOverviewHandler - Company-wide NPS overview.

use std::sync::Arc;

use crate::domain::answer::QuestionId;
use crate::domain::foundation::DomainError;
use crate::domain::reporting::{segment, SegmentReport};
use crate::ports::ResponseReader;

/// The headline report: recommendation and rehire NPS across every
/// response, plus participation counts.
#[derive(Debug, Clone)]
pub struct OverviewReport {
    pub recommend: SegmentReport,
    pub rehire: SegmentReport,
    /// Codes issued, whether or not the survey was opened.
    pub codes_issued: usize,
    /// Codes whose survey reached completion.
    pub completed: usize,
}

/// Handler computing the overview from the response read model.
pub struct GetOverviewHandler {
    responses: Arc<dyn ResponseReader>,
}

impl GetOverviewHandler {
    pub fn new(responses: Arc<dyn ResponseReader>) -> Self {
        Self { responses }
    }

    /// # Errors
    ///
    /// - `DatabaseError` on read failure
    pub async fn handle(&self) -> Result<OverviewReport, DomainError> {
        let responses = self.responses.fetch_all_responses().await?;

        let recommend = segment(&responses, |_| true, QuestionId::RecommendScore);
        let rehire = segment(&responses, |_| true, QuestionId::RehireScore);
        let completed = responses.iter().filter(|r| r.completed_at.is_some()).count();

        Ok(OverviewReport {
            recommend,
            rehire,
            codes_issued: responses.len(),
            completed,
        })
    }
}
