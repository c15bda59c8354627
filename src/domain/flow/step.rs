//! Survey step sequencing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The fixed, ordered steps of the survey flow.
///
/// `CodeUsed` sits outside the linear order: it is the terminal outcome
/// for a code whose survey was already submitted, reachable only on
/// entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStep {
    Welcome,
    Recommend,
    Reason,
    Rehire,
    Testimonial,
    Publish,
    Summary,
    ThankYou,
    CodeUsed,
}

impl SurveyStep {
    /// Linear forward order of the flow.
    pub const ORDER: [SurveyStep; 8] = [
        SurveyStep::Welcome,
        SurveyStep::Recommend,
        SurveyStep::Reason,
        SurveyStep::Rehire,
        SurveyStep::Testimonial,
        SurveyStep::Publish,
        SurveyStep::Summary,
        SurveyStep::ThankYou,
    ];

    /// Position in the linear order (None for `CodeUsed`).
    pub fn position(&self) -> Option<usize> {
        Self::ORDER.iter().position(|s| s == self)
    }

    /// The next step in the linear order, if any.
    pub fn next(&self) -> Option<SurveyStep> {
        self.position()
            .and_then(|i| Self::ORDER.get(i + 1).copied())
    }

    /// The previous step in the linear order, if any.
    pub fn prev(&self) -> Option<SurveyStep> {
        match self.position() {
            Some(i) if i > 0 => Some(Self::ORDER[i - 1]),
            _ => None,
        }
    }

    /// Whether the user may navigate backward from this step.
    ///
    /// Welcome has nothing behind it; the terminal steps allow no
    /// navigation at all.
    pub fn allows_back(&self) -> bool {
        !matches!(
            self,
            SurveyStep::Welcome | SurveyStep::ThankYou | SurveyStep::CodeUsed
        )
    }
}

impl StateMachine for SurveyStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SurveyStep::*;
        match self {
            // CodeUsed is reachable only from Welcome, when the code
            // reports completed on entry.
            Welcome => vec![Recommend, CodeUsed],
            Recommend => vec![Reason, Welcome],
            Reason => vec![Rehire, Recommend],
            Rehire => vec![Testimonial, Reason],
            Testimonial => vec![Publish, Rehire],
            Publish => vec![Summary, Testimonial],
            Summary => vec![ThankYou, Publish],
            ThankYou => vec![],
            CodeUsed => vec![],
        }
    }
}

impl fmt::Display for SurveyStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurveyStep::Welcome => "welcome",
            SurveyStep::Recommend => "recommend",
            SurveyStep::Reason => "reason",
            SurveyStep::Rehire => "rehire",
            SurveyStep::Testimonial => "testimonial",
            SurveyStep::Publish => "publish",
            SurveyStep::Summary => "summary",
            SurveyStep::ThankYou => "thank_you",
            SurveyStep::CodeUsed => "code_used",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_chain_follows_linear_order() {
        for pair in SurveyStep::ORDER.windows(2) {
            assert!(
                pair[0].can_transition_to(&pair[1]),
                "{:?} should advance to {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn backward_is_allowed_everywhere_except_edges() {
        assert!(!SurveyStep::Welcome.allows_back());
        assert!(!SurveyStep::ThankYou.allows_back());
        assert!(!SurveyStep::CodeUsed.allows_back());
        for step in [
            SurveyStep::Recommend,
            SurveyStep::Reason,
            SurveyStep::Rehire,
            SurveyStep::Testimonial,
            SurveyStep::Publish,
            SurveyStep::Summary,
        ] {
            assert!(step.allows_back(), "{:?} should allow back", step);
            let prev = step.prev().unwrap();
            assert!(step.can_transition_to(&prev));
        }
    }

    #[test]
    fn code_used_only_reachable_from_welcome() {
        assert!(SurveyStep::Welcome.can_transition_to(&SurveyStep::CodeUsed));
        for step in SurveyStep::ORDER.iter().skip(1) {
            assert!(!step.can_transition_to(&SurveyStep::CodeUsed));
        }
    }

    #[test]
    fn terminal_steps_have_no_transitions() {
        assert!(SurveyStep::ThankYou.is_terminal());
        assert!(SurveyStep::CodeUsed.is_terminal());
        assert!(!SurveyStep::Summary.is_terminal());
    }

    #[test]
    fn no_step_skipping() {
        assert!(!SurveyStep::Welcome.can_transition_to(&SurveyStep::Reason));
        assert!(!SurveyStep::Recommend.can_transition_to(&SurveyStep::Summary));
        assert!(!SurveyStep::Summary.can_transition_to(&SurveyStep::Recommend));
    }
}
