//! Answer value encoding.
//!
//! The storage layer keeps every answer as TEXT. Values are serialized
//! to their canonical string form on the way in and decoded by the
//! reader side using the question's known kind; the collector itself is
//! type-agnostic.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::question::QuestionKind;

/// Bounds of a score answer (inclusive).
pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

/// A decoded answer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Score(u8),
    Text(String),
    Flag(bool),
}

impl AnswerValue {
    /// Validates and wraps a survey score.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if outside `[1, 10]`
    pub fn score(value: i32) -> Result<Self, ValidationError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(ValidationError::out_of_range(
                "score", MIN_SCORE, MAX_SCORE, value,
            ));
        }
        Ok(AnswerValue::Score(value as u8))
    }

    /// Validates and wraps free text, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the trimmed text is empty
    pub fn text(field: &str, value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        Ok(AnswerValue::Text(trimmed.to_string()))
    }

    /// Wraps a boolean choice.
    pub fn flag(value: bool) -> Self {
        AnswerValue::Flag(value)
    }

    /// Canonical storage encoding: scores as digits, booleans as
    /// `"true"`/`"false"`, text as-is.
    pub fn encode(&self) -> String {
        match self {
            AnswerValue::Score(s) => s.to_string(),
            AnswerValue::Text(t) => t.clone(),
            AnswerValue::Flag(b) => b.to_string(),
        }
    }

    /// Decodes a stored string using the question's known kind.
    ///
    /// Returns `None` for malformed input; reporting excludes such rows
    /// rather than treating them as zero or as an error.
    pub fn decode(kind: QuestionKind, raw: &str) -> Option<Self> {
        match kind {
            QuestionKind::Score => raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(|n| Self::score(n).ok()),
            QuestionKind::Text => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(AnswerValue::Text(trimmed.to_string()))
                }
            }
            QuestionKind::Flag => match raw.trim() {
                "true" => Some(AnswerValue::Flag(true)),
                "false" => Some(AnswerValue::Flag(false)),
                _ => None,
            },
        }
    }

    /// Returns the numeric score if this value is one.
    pub fn as_score(&self) -> Option<i32> {
        match self {
            AnswerValue::Score(s) => Some(*s as i32),
            _ => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_enforces_bounds() {
        assert!(AnswerValue::score(0).is_err());
        assert!(AnswerValue::score(11).is_err());
        assert_eq!(AnswerValue::score(10).unwrap(), AnswerValue::Score(10));
    }

    #[test]
    fn text_trims_and_rejects_empty() {
        assert_eq!(
            AnswerValue::text("testimonial", "  great team  ").unwrap(),
            AnswerValue::Text("great team".to_string())
        );
        assert!(AnswerValue::text("testimonial", "   ").is_err());
    }

    #[test]
    fn encoding_is_canonical() {
        assert_eq!(AnswerValue::Score(9).encode(), "9");
        assert_eq!(AnswerValue::Flag(true).encode(), "true");
        assert_eq!(AnswerValue::Flag(false).encode(), "false");
        assert_eq!(AnswerValue::Text("ok".into()).encode(), "ok");
    }

    #[test]
    fn decode_round_trips_encoded_values() {
        let cases = [
            (QuestionKind::Score, AnswerValue::Score(7)),
            (QuestionKind::Text, AnswerValue::Text("solid work".into())),
            (QuestionKind::Flag, AnswerValue::Flag(false)),
        ];
        for (kind, value) in cases {
            assert_eq!(AnswerValue::decode(kind, &value.encode()), Some(value));
        }
    }

    #[test]
    fn decode_returns_none_for_malformed_input() {
        assert_eq!(AnswerValue::decode(QuestionKind::Score, "n/a"), None);
        assert_eq!(AnswerValue::decode(QuestionKind::Score, "15"), None);
        assert_eq!(AnswerValue::decode(QuestionKind::Flag, "yes"), None);
        assert_eq!(AnswerValue::decode(QuestionKind::Text, "  "), None);
    }
}
