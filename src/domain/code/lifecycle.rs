//! Survey code lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle of a survey code as seen by a caller entering the flow.
///
/// `Fresh` covers both never-started and started-but-unfinished codes:
/// either may continue the survey. `Completed` is terminal; a completed
/// code accepts no further activity and routes the UI to its
/// code-already-used outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeLifecycle {
    Fresh,
    Completed,
}

impl StateMachine for CodeLifecycle {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (CodeLifecycle::Fresh, CodeLifecycle::Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            CodeLifecycle::Fresh => vec![CodeLifecycle::Completed],
            CodeLifecycle::Completed => vec![],
        }
    }
}

impl fmt::Display for CodeLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CodeLifecycle::Fresh => "fresh",
            CodeLifecycle::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}
