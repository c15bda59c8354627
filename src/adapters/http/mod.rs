//! HTTP adapters - REST API over the application handlers.

pub mod admin;
pub mod error;
pub mod survey;

pub use admin::{admin_routes, AdminHandlers};
pub use survey::{survey_routes, SurveyHandlers};
