//! In-memory adapters for tests.

mod survey_store;

pub use survey_store::InMemorySurveyStore;
