//! Survey flow handlers: enter, activate, advance, submit.

mod activate_code;
mod advance_step;
mod enter_survey;
mod submit_survey;

pub use activate_code::ActivateCodeHandler;
pub use advance_step::AdvanceStepHandler;
pub use enter_survey::EnterSurveyHandler;
pub use submit_survey::SubmitSurveyHandler;
