//! SurveyAnswer - one row of the append-only answer log.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AnswerId, SurveyCodeId, Timestamp};

use super::{AnswerValue, QuestionId};

/// One recorded answer.
///
/// The log is append-only: a question answered twice produces two rows
/// and the latest timestamp wins for display. Rows are never mutated or
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyAnswer {
    id: AnswerId,
    survey_code_id: SurveyCodeId,
    question_id: QuestionId,
    answer: String,
    timestamp: Timestamp,
}

impl SurveyAnswer {
    /// Creates a new answer row stamped now.
    pub fn new(survey_code_id: SurveyCodeId, question_id: QuestionId, value: &AnswerValue) -> Self {
        Self {
            id: AnswerId::new(),
            survey_code_id,
            question_id,
            answer: value.encode(),
            timestamp: Timestamp::now(),
        }
    }

    /// Reconstitutes an answer row from persistence.
    pub fn reconstitute(
        id: AnswerId,
        survey_code_id: SurveyCodeId,
        question_id: QuestionId,
        answer: String,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            survey_code_id,
            question_id,
            answer,
            timestamp,
        }
    }

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn survey_code_id(&self) -> &SurveyCodeId {
        &self.survey_code_id
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    /// Raw stored string.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Decodes the stored string using the question's known kind.
    pub fn decoded(&self) -> Option<AnswerValue> {
        AnswerValue::decode(self.question_id.kind(), &self.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_answer_encodes_value() {
        let answer = SurveyAnswer::new(
            SurveyCodeId::new(),
            QuestionId::RecommendScore,
            &AnswerValue::Score(9),
        );
        assert_eq!(answer.answer(), "9");
        assert_eq!(answer.decoded(), Some(AnswerValue::Score(9)));
    }

    #[test]
    fn decoded_is_none_for_malformed_row() {
        let answer = SurveyAnswer::reconstitute(
            AnswerId::new(),
            SurveyCodeId::new(),
            QuestionId::RehireScore,
            "not-a-number".to_string(),
            Timestamp::now(),
        );
        assert_eq!(answer.decoded(), None);
    }
}
