//! HTTP handlers for the admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::answer::GetAnswersHandler;
use crate::application::handlers::code::{GenerateCodeCommand, GenerateCodeHandler};
use crate::application::handlers::report::{
    CompareSegmentsHandler, GetOverviewHandler, SegmentMetric,
};
use crate::domain::code::CodeToken;
use crate::domain::foundation::ProjectId;

use super::dto::{
    CodeAnswersResponse, GenerateCodeRequest, GeneratedCodeResponse, OverviewResponse,
    SegmentsQuery, SegmentsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AdminHandlers {
    generate_handler: Arc<GenerateCodeHandler>,
    answers_handler: Arc<GetAnswersHandler>,
    overview_handler: Arc<GetOverviewHandler>,
    segments_handler: Arc<CompareSegmentsHandler>,
}

impl AdminHandlers {
    pub fn new(
        generate_handler: Arc<GenerateCodeHandler>,
        answers_handler: Arc<GetAnswersHandler>,
        overview_handler: Arc<GetOverviewHandler>,
        segments_handler: Arc<CompareSegmentsHandler>,
    ) -> Self {
        Self {
            generate_handler,
            answers_handler,
            overview_handler,
            segments_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/codes - Issue a new survey code
pub async fn generate_code(
    State(handlers): State<AdminHandlers>,
    Json(req): Json<GenerateCodeRequest>,
) -> Response {
    let project_id = match req.project_id.parse::<ProjectId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid project ID")),
            )
                .into_response()
        }
    };

    let cmd = GenerateCodeCommand {
        name: req.name,
        email: req.email,
        project_id,
        service_type: req.service_type,
        language: req.language.unwrap_or_default(),
        scopes: req.scopes,
    };

    match handlers.generate_handler.handle(cmd).await {
        Ok(code) => {
            let response = GeneratedCodeResponse::from(&code);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/admin/codes/:code/answers - Full answer timeline for a code
pub async fn get_code_answers(
    State(handlers): State<AdminHandlers>,
    Path(code): Path<String>,
) -> Response {
    let token = match CodeToken::parse(&code) {
        Ok(token) => token,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers.answers_handler.handle(&token).await {
        Ok(view) => {
            let response = CodeAnswersResponse::from(view);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/admin/reports/overview - Company-wide NPS overview
pub async fn get_overview(State(handlers): State<AdminHandlers>) -> Response {
    match handlers.overview_handler.handle().await {
        Ok(report) => {
            let response = OverviewResponse::from(&report);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// GET /api/admin/reports/segments - NPS broken down by segment
pub async fn get_segments(
    State(handlers): State<AdminHandlers>,
    Query(query): Query<SegmentsQuery>,
) -> Response {
    let metric = match query.metric.as_deref() {
        None | Some("recommend") => SegmentMetric::Recommend,
        Some("rehire") => SegmentMetric::Rehire,
        Some(other) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!(
                    "Unknown metric '{}'",
                    other
                ))),
            )
                .into_response()
        }
    };

    match handlers.segments_handler.handle(metric).await {
        Ok(report) => {
            let response = SegmentsResponse::from(&report);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}
