//! Answer recording and timeline handlers.

mod get_answers;
mod record_answer;

pub use get_answers::{CodeAnswersView, GetAnswersHandler};
pub use record_answer::{RecordAnswerCommand, RecordAnswerHandler};
