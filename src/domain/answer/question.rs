//! Question identifiers and their answer kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The fixed set of questions the survey asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    RecommendScore,
    RecommendReason,
    RehireScore,
    Testimonial,
    CanPublish,
}

/// What kind of value a question's answer decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Score,
    Text,
    Flag,
}

impl QuestionId {
    /// Storage form, matching the `survey_answers.question_id` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionId::RecommendScore => "recommend_score",
            QuestionId::RecommendReason => "recommend_reason",
            QuestionId::RehireScore => "rehire_score",
            QuestionId::Testimonial => "testimonial",
            QuestionId::CanPublish => "can_publish",
        }
    }

    /// The value kind the reader side decodes this question with.
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionId::RecommendScore | QuestionId::RehireScore => QuestionKind::Score,
            QuestionId::RecommendReason | QuestionId::Testimonial => QuestionKind::Text,
            QuestionId::CanPublish => QuestionKind::Flag,
        }
    }

    /// All questions in survey order.
    pub fn all() -> [QuestionId; 5] {
        [
            QuestionId::RecommendScore,
            QuestionId::RecommendReason,
            QuestionId::RehireScore,
            QuestionId::Testimonial,
            QuestionId::CanPublish,
        ]
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommend_score" => Ok(QuestionId::RecommendScore),
            "recommend_reason" => Ok(QuestionId::RecommendReason),
            "rehire_score" => Ok(QuestionId::RehireScore),
            "testimonial" => Ok(QuestionId::Testimonial),
            "can_publish" => Ok(QuestionId::CanPublish),
            other => Err(ValidationError::invalid_format(
                "question_id",
                format!("unknown question '{}'", other),
            )),
        }
    }
}
