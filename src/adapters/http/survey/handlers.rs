//! HTTP handlers for the public survey endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{domain_error_response, ErrorResponse};
use crate::application::handlers::answer::{RecordAnswerCommand, RecordAnswerHandler};
use crate::application::handlers::flow::{
    ActivateCodeHandler, EnterSurveyHandler, SubmitSurveyHandler,
};
use crate::domain::code::CodeToken;

use super::dto::{
    ActivateResponse, AnswerPayload, AnswerResponse, CompleteResponse, CompleteSurveyRequest,
    SurveyCodeResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SurveyHandlers {
    enter_handler: Arc<EnterSurveyHandler>,
    activate_handler: Arc<ActivateCodeHandler>,
    record_handler: Arc<RecordAnswerHandler>,
    submit_handler: Arc<SubmitSurveyHandler>,
}

impl SurveyHandlers {
    pub fn new(
        enter_handler: Arc<EnterSurveyHandler>,
        activate_handler: Arc<ActivateCodeHandler>,
        record_handler: Arc<RecordAnswerHandler>,
        submit_handler: Arc<SubmitSurveyHandler>,
    ) -> Self {
        Self {
            enter_handler,
            activate_handler,
            record_handler,
            submit_handler,
        }
    }
}

fn parse_token(raw: &str) -> Result<CodeToken, Response> {
    CodeToken::parse(raw).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response()
    })
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/survey/:code - Validate a code and describe its survey
pub async fn get_survey(
    State(handlers): State<SurveyHandlers>,
    Path(code): Path<String>,
) -> Response {
    let token = match parse_token(&code) {
        Ok(token) => token,
        Err(response) => return response,
    };

    match handlers.enter_handler.handle(&token).await {
        Ok(session) => {
            let response = SurveyCodeResponse::from(session.code());
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/survey/:code/activate - Stamp the first-opened timestamp
pub async fn activate_survey(
    State(handlers): State<SurveyHandlers>,
    Path(code): Path<String>,
) -> Response {
    let token = match parse_token(&code) {
        Ok(token) => token,
        Err(response) => return response,
    };

    match handlers.activate_handler.handle(&token).await {
        Ok(started_at) => {
            (StatusCode::OK, Json(ActivateResponse { started_at })).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/survey/:code/answers - Append one answer row
pub async fn record_answer(
    State(handlers): State<SurveyHandlers>,
    Path(code): Path<String>,
    Json(payload): Json<AnswerPayload>,
) -> Response {
    let token = match parse_token(&code) {
        Ok(token) => token,
        Err(response) => return response,
    };
    let (question_id, value) = match payload.resolve() {
        Ok(resolved) => resolved,
        Err(e) => return domain_error_response(e),
    };

    let cmd = RecordAnswerCommand {
        code: token,
        question_id,
        value,
    };
    match handlers.record_handler.handle(cmd).await {
        Ok(answer) => {
            let response = AnswerResponse::from(&answer);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

/// POST /api/survey/:code/complete - Submit the full answer snapshot
pub async fn complete_survey(
    State(handlers): State<SurveyHandlers>,
    Path(code): Path<String>,
    Json(req): Json<CompleteSurveyRequest>,
) -> Response {
    let token = match parse_token(&code) {
        Ok(token) => token,
        Err(response) => return response,
    };

    let mut answers = Vec::with_capacity(req.answers.len());
    for payload in &req.answers {
        match payload.resolve() {
            Ok(resolved) => answers.push(resolved),
            Err(e) => return domain_error_response(e),
        }
    }

    match handlers.submit_handler.handle_snapshot(&token, &answers).await {
        Ok(completed_at) => {
            (StatusCode::OK, Json(CompleteResponse { completed_at })).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}
