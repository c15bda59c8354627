//! Answer module - the append-only response log.

mod question;
mod record;
mod value;

pub use question::{QuestionId, QuestionKind};
pub use record::SurveyAnswer;
pub use value::{AnswerValue, MAX_SCORE, MIN_SCORE};
