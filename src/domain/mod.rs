//! Domain layer - the survey core.
//!
//! Pure business logic: code lifecycle, the answer log, the step state
//! machine, and NPS aggregation. Everything stateful talks to the
//! outside world through `crate::ports`.

pub mod answer;
pub mod code;
pub mod flow;
pub mod foundation;
pub mod reporting;
