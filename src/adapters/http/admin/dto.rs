//! HTTP DTOs for the admin endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::answer::CodeAnswersView;
use crate::application::handlers::report::{OverviewReport, SegmentMetric, SegmentsReport};
use crate::domain::code::{Language, Scope, ServiceType, SurveyCode};
use crate::domain::foundation::Timestamp;
use crate::domain::reporting::SegmentReport;

use crate::adapters::http::survey::dto::AnswerResponse;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to issue a new survey code.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateCodeRequest {
    pub name: String,
    pub email: String,
    pub project_id: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub scopes: Vec<Scope>,
}

/// Query parameters for the segments report.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentsQuery {
    #[serde(default)]
    pub metric: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A freshly issued code.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCodeResponse {
    pub code: String,
    pub name: String,
    pub email: String,
    pub service_type: ServiceType,
    pub language: Language,
    pub scopes: Vec<Scope>,
    pub generated_at: Timestamp,
}

impl From<&SurveyCode> for GeneratedCodeResponse {
    fn from(code: &SurveyCode) -> Self {
        Self {
            code: code.token().to_string(),
            name: code.name().to_string(),
            email: code.email().to_string(),
            service_type: code.service_type(),
            language: code.language().clone(),
            scopes: code.scopes().to_vec(),
            generated_at: *code.generated_at(),
        }
    }
}

/// One code's answer timeline with its project labels.
#[derive(Debug, Clone, Serialize)]
pub struct CodeAnswersResponse {
    pub code: String,
    pub name: String,
    pub project_name: Option<String>,
    pub company_name: Option<String>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub answers: Vec<AnswerResponse>,
}

impl From<CodeAnswersView> for CodeAnswersResponse {
    fn from(view: CodeAnswersView) -> Self {
        let (project_name, company_name) = match view.project {
            Some(label) => (Some(label.project_name), Some(label.company_name)),
            None => (None, None),
        };
        Self {
            code: view.response.token.to_string(),
            name: view.response.name.clone(),
            project_name,
            company_name,
            started_at: view.response.started_at,
            completed_at: view.response.completed_at,
            answers: view.response.answers.iter().map(AnswerResponse::from).collect(),
        }
    }
}

/// NPS numbers for one slice of responses.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentDto {
    pub nps: i32,
    pub promoters: usize,
    pub neutrals: usize,
    pub detractors: usize,
    pub total: usize,
}

impl From<&SegmentReport> for SegmentDto {
    fn from(report: &SegmentReport) -> Self {
        Self {
            nps: report.nps,
            promoters: report.counts.promoters,
            neutrals: report.counts.neutrals,
            detractors: report.counts.detractors,
            total: report.total,
        }
    }
}

/// The company-wide overview.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewResponse {
    pub recommend: SegmentDto,
    pub rehire: SegmentDto,
    pub codes_issued: usize,
    pub completed: usize,
}

impl From<&OverviewReport> for OverviewResponse {
    fn from(report: &OverviewReport) -> Self {
        Self {
            recommend: SegmentDto::from(&report.recommend),
            rehire: SegmentDto::from(&report.rehire),
            codes_issued: report.codes_issued,
            completed: report.completed,
        }
    }
}

/// Per-segment NPS comparison.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentsResponse {
    pub metric: String,
    pub by_service_type: Vec<NamedSegment>,
    pub by_scope: Vec<NamedSegment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedSegment {
    pub segment: String,
    #[serde(flatten)]
    pub report: SegmentDto,
}

impl From<&SegmentsReport> for SegmentsResponse {
    fn from(report: &SegmentsReport) -> Self {
        Self {
            metric: match report.metric {
                SegmentMetric::Recommend => "recommend".to_string(),
                SegmentMetric::Rehire => "rehire".to_string(),
            },
            by_service_type: report
                .by_service_type
                .iter()
                .map(|(st, seg)| NamedSegment {
                    segment: st.as_str().to_string(),
                    report: SegmentDto::from(seg),
                })
                .collect(),
            by_scope: report
                .by_scope
                .iter()
                .map(|(scope, seg)| NamedSegment {
                    segment: scope.as_str().to_string(),
                    report: SegmentDto::from(seg),
                })
                .collect(),
        }
    }
}
