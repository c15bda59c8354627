//! Flow module - the survey step state machine.

mod session;
mod stage;
mod step;

pub use session::{Advance, SurveyDraft, SurveySession};
pub use stage::{stage_for, StageDescriptor, StepInput, STAGES};
pub use step::SurveyStep;
