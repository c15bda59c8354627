//! Score classification and the NPS formula.
//!
//! `classify` is the single source of truth for promoter/neutral/
//! detractor boundaries; per-respondent labels and the aggregate score
//! both go through it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Respondent category derived from a 1-10 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Promoter,
    Neutral,
    Detractor,
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreCategory::Promoter => "promoter",
            ScoreCategory::Neutral => "neutral",
            ScoreCategory::Detractor => "detractor",
        };
        write!(f, "{}", s)
    }
}

/// Classifies a score: `>= 9` promoter, `7..=8` neutral, `<= 6` detractor.
pub fn classify(score: i32) -> ScoreCategory {
    if score >= 9 {
        ScoreCategory::Promoter
    } else if score >= 7 {
        ScoreCategory::Neutral
    } else {
        ScoreCategory::Detractor
    }
}

/// Respondent counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub promoters: usize,
    pub neutrals: usize,
    pub detractors: usize,
}

impl CategoryCounts {
    /// Tallies one classified score.
    pub fn add(&mut self, category: ScoreCategory) {
        match category {
            ScoreCategory::Promoter => self.promoters += 1,
            ScoreCategory::Neutral => self.neutrals += 1,
            ScoreCategory::Detractor => self.detractors += 1,
        }
    }

    /// Tallies a sequence of scores.
    pub fn from_scores(scores: &[i32]) -> Self {
        let mut counts = Self::default();
        for score in scores {
            counts.add(classify(*score));
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.promoters + self.neutrals + self.detractors
    }

    /// NPS over these counts: `round((promoters - detractors) / total * 100)`.
    ///
    /// Returns 0 when no respondents were counted.
    pub fn nps(&self) -> i32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let spread = self.promoters as f64 - self.detractors as f64;
        (spread / total as f64 * 100.0).round() as i32
    }
}

/// NPS over a raw score sequence; 0 for an empty sequence.
pub fn nps_score(scores: &[i32]) -> i32 {
    CategoryCounts::from_scores(scores).nps()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_match_definition() {
        assert_eq!(classify(10), ScoreCategory::Promoter);
        assert_eq!(classify(9), ScoreCategory::Promoter);
        assert_eq!(classify(8), ScoreCategory::Neutral);
        assert_eq!(classify(7), ScoreCategory::Neutral);
        assert_eq!(classify(6), ScoreCategory::Detractor);
        assert_eq!(classify(0), ScoreCategory::Detractor);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(nps_score(&[]), 0);
    }

    #[test]
    fn single_promoter_scores_one_hundred() {
        assert_eq!(nps_score(&[9]), 100);
        assert_eq!(nps_score(&[10]), 100);
    }

    #[test]
    fn balanced_population_scores_zero() {
        // one promoter, one neutral, one detractor
        let counts = CategoryCounts::from_scores(&[9, 7, 3]);
        assert_eq!(counts.promoters, 1);
        assert_eq!(counts.neutrals, 1);
        assert_eq!(counts.detractors, 1);
        assert_eq!(counts.nps(), 0);
    }

    #[test]
    fn rounding_follows_round_half_away() {
        // 1 promoter of 3 -> 33.33 -> 33
        assert_eq!(nps_score(&[9, 7, 7]), 33);
        // 2 detractors of 3 -> -66.67 -> -67
        assert_eq!(nps_score(&[3, 4, 7]), -67);
    }

    proptest! {
        /// Every score in 0..=10 lands in exactly one category.
        #[test]
        fn classification_is_total(score in 0i32..=10) {
            let category = classify(score);
            match score {
                s if s >= 9 => prop_assert_eq!(category, ScoreCategory::Promoter),
                s if s >= 7 => prop_assert_eq!(category, ScoreCategory::Neutral),
                _ => prop_assert_eq!(category, ScoreCategory::Detractor),
            }
        }

        /// The aggregate formula matches the per-score classification.
        #[test]
        fn nps_matches_manual_formula(scores in prop::collection::vec(0i32..=10, 1..200)) {
            let promoters = scores.iter().filter(|s| **s >= 9).count() as f64;
            let detractors = scores.iter().filter(|s| **s <= 6).count() as f64;
            let expected =
                ((promoters - detractors) / scores.len() as f64 * 100.0).round() as i32;
            prop_assert_eq!(nps_score(&scores), expected);
        }

        /// NPS always stays within [-100, 100].
        #[test]
        fn nps_is_bounded(scores in prop::collection::vec(0i32..=10, 0..200)) {
            let nps = nps_score(&scores);
            prop_assert!((-100..=100).contains(&nps));
        }
    }
}
