//! CompareSegmentsHandler - NPS broken down by service type and scope.

use std::sync::Arc;

use crate::domain::answer::QuestionId;
use crate::domain::code::{Scope, ServiceType};
use crate::domain::foundation::DomainError;
use crate::domain::reporting::{segment, SegmentReport};
use crate::ports::ResponseReader;

/// Which metric question a segment comparison runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMetric {
    Recommend,
    Rehire,
}

impl SegmentMetric {
    fn question(self) -> QuestionId {
        match self {
            SegmentMetric::Recommend => QuestionId::RecommendScore,
            SegmentMetric::Rehire => QuestionId::RehireScore,
        }
    }
}

/// Per-segment NPS comparison.
#[derive(Debug, Clone)]
pub struct SegmentsReport {
    pub metric: SegmentMetric,
    pub by_service_type: Vec<(ServiceType, SegmentReport)>,
    pub by_scope: Vec<(Scope, SegmentReport)>,
}

/// Handler computing segment comparisons from the response read model.
pub struct CompareSegmentsHandler {
    responses: Arc<dyn ResponseReader>,
}

impl CompareSegmentsHandler {
    pub fn new(responses: Arc<dyn ResponseReader>) -> Self {
        Self { responses }
    }

    /// # Errors
    ///
    /// - `DatabaseError` on read failure
    pub async fn handle(&self, metric: SegmentMetric) -> Result<SegmentsReport, DomainError> {
        let responses = self.responses.fetch_all_responses().await?;
        let question = metric.question();

        let by_service_type = [ServiceType::Experience, ServiceType::Strategy]
            .into_iter()
            .map(|st| {
                (
                    st,
                    segment(&responses, |r| r.service_type == st, question),
                )
            })
            .collect();

        let by_scope = Scope::all()
            .iter()
            .map(|&scope| {
                (
                    scope,
                    segment(&responses, |r| r.scopes.contains(&scope), question),
                )
            })
            .collect();

        Ok(SegmentsReport {
            metric,
            by_service_type,
            by_scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySurveyStore;
    use crate::domain::answer::AnswerValue;
    use crate::domain::code::{CodeToken, Language, SurveyCode};
    use crate::domain::foundation::{ProjectId, SurveyCodeId};
    use crate::ports::{AnswerRepository, CodeRepository};

    async fn seed(
        store: &InMemorySurveyStore,
        token: &str,
        service_type: ServiceType,
        scopes: Vec<Scope>,
        score: i32,
    ) {
        let code = SurveyCode::new(
            SurveyCodeId::new(),
            CodeToken::parse(token).unwrap(),
            "Respondent".to_string(),
            "r@example.com".to_string(),
            ProjectId::new(),
            service_type,
            Language::default(),
            scopes,
        )
        .unwrap();
        store.save(&code).await.unwrap();
        store
            .append(
                code.id(),
                QuestionId::RecommendScore,
                &AnswerValue::score(score).unwrap(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn splits_by_service_type_and_scope() {
        let store = Arc::new(InMemorySurveyStore::new());
        seed(&store, "AAAA2345", ServiceType::Experience, vec![Scope::Tech], 10).await;
        seed(&store, "BBBB2345", ServiceType::Experience, vec![Scope::Tech], 9).await;
        seed(&store, "CCCC2345", ServiceType::Strategy, vec![Scope::Design], 2).await;

        let handler = CompareSegmentsHandler::new(store);
        let report = handler.handle(SegmentMetric::Recommend).await.unwrap();

        let experience = &report
            .by_service_type
            .iter()
            .find(|(st, _)| *st == ServiceType::Experience)
            .unwrap()
            .1;
        assert_eq!(experience.total, 2);
        assert_eq!(experience.nps, 100);

        let strategy = &report
            .by_service_type
            .iter()
            .find(|(st, _)| *st == ServiceType::Strategy)
            .unwrap()
            .1;
        assert_eq!(strategy.nps, -100);

        let tech = &report
            .by_scope
            .iter()
            .find(|(s, _)| *s == Scope::Tech)
            .unwrap()
            .1;
        assert_eq!(tech.total, 2);

        let manda = &report
            .by_scope
            .iter()
            .find(|(s, _)| *s == Scope::MergersAndFinance)
            .unwrap()
            .1;
        assert_eq!(manda.total, 0);
        assert_eq!(manda.nps, 0);
    }
}
