//! HTTP routes for the public survey endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    activate_survey, complete_survey, get_survey, record_answer, SurveyHandlers,
};

/// Creates the public survey router.
pub fn survey_routes(handlers: SurveyHandlers) -> Router {
    Router::new()
        .route("/:code", get(get_survey))
        .route("/:code/activate", post(activate_survey))
        .route("/:code/answers", post(record_answer))
        .route("/:code/complete", post(complete_survey))
        .with_state(handlers)
}
