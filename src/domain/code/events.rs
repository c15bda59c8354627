//! Domain events emitted by the survey code lifecycle.

use serde_json::json;

use crate::domain::foundation::{EventEnvelope, Timestamp};

use super::{CodeToken, SurveyCode};

const AGGREGATE_TYPE: &str = "SurveyCode";

/// A new code was generated by an administrator.
pub fn code_generated(code: &SurveyCode) -> EventEnvelope {
    EventEnvelope::new(
        "code.generated.v1",
        code.token().as_str(),
        AGGREGATE_TYPE,
        json!({
            "code": code.token().as_str(),
            "project_id": code.project_id(),
            "service_type": code.service_type(),
            "generated_at": code.generated_at(),
        }),
    )
}

/// A respondent entered the survey for the first time.
pub fn code_activated(token: &CodeToken, started_at: Timestamp) -> EventEnvelope {
    EventEnvelope::new(
        "code.activated.v1",
        token.as_str(),
        AGGREGATE_TYPE,
        json!({
            "code": token.as_str(),
            "started_at": started_at,
        }),
    )
}

/// A survey was submitted and its code closed.
pub fn survey_completed(token: &CodeToken, completed_at: Timestamp) -> EventEnvelope {
    EventEnvelope::new(
        "survey.completed.v1",
        token.as_str(),
        AGGREGATE_TYPE,
        json!({
            "code": token.as_str(),
            "completed_at": completed_at,
        }),
    )
}
