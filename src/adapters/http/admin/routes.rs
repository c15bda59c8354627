//! HTTP routes for the admin endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_code, get_code_answers, get_overview, get_segments, AdminHandlers,
};

/// Creates the admin router.
pub fn admin_routes(handlers: AdminHandlers) -> Router {
    Router::new()
        .route("/codes", post(generate_code))
        .route("/codes/:code/answers", get(get_code_answers))
        .route("/reports/overview", get(get_overview))
        .route("/reports/segments", get(get_segments))
        .with_state(handlers)
}
