use serde::{Deserialize, Serialize};

use super::{
    dimensions::{AnswerWeightTable, Axis, DimensionWeight},
    types::derive_types_with_config,
};
use crate::config::{env_or, ConfigError};

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalityConfig {
    /// Number of scored questions in the bank; the confidence denominator.
    pub total_scorable_questions: u32,
    /// Axes with |score| at or below this margin are treated as balanced.
    pub type_margin: f64,
    /// Maximum number of type codes returned (primary included).
    pub max_types: usize,
}

impl Default for PersonalityConfig {
    fn default() -> Self {
        Self {
            total_scorable_questions: 32,
            type_margin: 3.0,
            max_types: 3,
        }
    }
}

impl PersonalityConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            total_scorable_questions: env_or(
                "CG_TOTAL_SCORABLE_QUESTIONS",
                defaults.total_scorable_questions,
            ),
            type_margin: env_or("CG_TYPE_MARGIN", defaults.type_margin),
            ..defaults
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_scorable_questions == 0 {
            return Err(ConfigError::ZeroScorableQuestions);
        }
        if !self.type_margin.is_finite() || self.type_margin < 0.0 {
            return Err(ConfigError::InvalidTypeMargin(self.type_margin));
        }
        Ok(())
    }
}

/// Signed axis scores with per-axis response counters.
///
/// Positive scores lean towards E, S, T, J; negative towards I, N, F, P.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub e_i_score: f64,
    pub s_n_score: f64,
    pub t_f_score: f64,
    pub j_p_score: f64,
    pub e_i_responses: u32,
    pub s_n_responses: u32,
    pub t_f_responses: u32,
    pub j_p_responses: u32,
    pub confidence_level: f64,
}

impl DimensionScores {
    pub fn score(&self, axis: Axis) -> f64 {
        match axis {
            Axis::EI => self.e_i_score,
            Axis::SN => self.s_n_score,
            Axis::TF => self.t_f_score,
            Axis::JP => self.j_p_score,
        }
    }

    pub fn responses(&self, axis: Axis) -> u32 {
        match axis {
            Axis::EI => self.e_i_responses,
            Axis::SN => self.s_n_responses,
            Axis::TF => self.t_f_responses,
            Axis::JP => self.j_p_responses,
        }
    }

    fn apply(&mut self, weight: &DimensionWeight) {
        let signed = if weight.dimension.is_positive_pole() {
            weight.weight
        } else {
            -weight.weight
        };

        let (score, counter) = match weight.dimension.axis() {
            Axis::EI => (&mut self.e_i_score, &mut self.e_i_responses),
            Axis::SN => (&mut self.s_n_score, &mut self.s_n_responses),
            Axis::TF => (&mut self.t_f_score, &mut self.t_f_responses),
            Axis::JP => (&mut self.j_p_score, &mut self.j_p_responses),
        };
        *score += signed;
        *counter += 1;
    }
}

pub struct PersonalityAnalyzer {
    config: PersonalityConfig,
}

impl PersonalityAnalyzer {
    pub fn new(config: PersonalityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PersonalityConfig {
        &self.config
    }

    /// Accumulate axis scores for a set of (question_id, answer) pairs.
    ///
    /// Responses are applied in (question_id, answer) order, so the result is
    /// identical whatever order the caller's map iterates in. Answers with no
    /// weight row contribute nothing.
    pub fn score<I, K, V>(&self, responses: I, weights: &AnswerWeightTable) -> DimensionScores
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut ordered: Vec<(K, V)> = responses.into_iter().collect();
        ordered.sort_by(|a, b| {
            a.0.as_ref()
                .cmp(b.0.as_ref())
                .then_with(|| a.1.as_ref().cmp(b.1.as_ref()))
        });

        let mut scores = DimensionScores::default();
        for (question_id, answer) in &ordered {
            for weight in weights.lookup(question_id.as_ref(), answer.as_ref()) {
                scores.apply(weight);
            }
        }

        let answered = Axis::ALL
            .iter()
            .map(|axis| scores.responses(*axis))
            .max()
            .unwrap_or(0);
        scores.confidence_level = if self.config.total_scorable_questions == 0 {
            0.0
        } else {
            (f64::from(answered) / f64::from(self.config.total_scorable_questions)).min(1.0)
        };

        scores
    }

    /// Primary type code first, then up to `max_types - 1` plausible alternates.
    pub fn derive_types(&self, scores: &DimensionScores) -> Vec<String> {
        derive_types_with_config(scores, &self.config)
    }
}

impl Default for PersonalityAnalyzer {
    fn default() -> Self {
        Self::new(PersonalityConfig::default())
    }
}

/// Score responses with the default configuration (32 scorable questions).
pub fn score_dimensions<I, K, V>(responses: I, weights: &AnswerWeightTable) -> DimensionScores
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    PersonalityAnalyzer::default().score(responses, weights)
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::*;
    use crate::personality::{AnswerWeight, Dimension};

    fn table() -> AnswerWeightTable {
        let rows = [
            ("q1", "Parties", Dimension::E, 2.0),
            ("q1", "Reading", Dimension::I, 2.0),
            ("q2", "Facts", Dimension::S, 1.5),
            ("q2", "Ideas", Dimension::N, 1.5),
            ("q3", "Logic", Dimension::T, 1.0),
            ("q3", "Logic", Dimension::J, 0.5),
            ("q4", "Spontaneous", Dimension::P, 3.0),
        ];
        AnswerWeightTable::from_rows(
            rows.iter()
                .map(|(q, a, d, w)| AnswerWeight {
                    question_id: q.to_string(),
                    answer_value: a.to_string(),
                    dimension: *d,
                    weight: *w,
                })
                .collect(),
        )
        .expect("valid table")
    }

    #[test]
    fn accumulates_signed_scores_and_counters() {
        let responses: HashMap<String, String> = [
            ("q1", "Reading"),
            ("q2", "Facts"),
            ("q3", "Logic"),
            ("q4", "Spontaneous"),
        ]
        .into_iter()
        .map(|(q, a)| (q.to_string(), a.to_string()))
        .collect();

        let scores = score_dimensions(&responses, &table());

        assert_eq!(scores.e_i_score, -2.0);
        assert_eq!(scores.s_n_score, 1.5);
        assert_eq!(scores.t_f_score, 1.0);
        assert_eq!(scores.j_p_score, 0.5 - 3.0);
        assert_eq!(scores.e_i_responses, 1);
        assert_eq!(scores.j_p_responses, 2);
        assert!((scores.confidence_level - 2.0 / 32.0).abs() < 1e-12);
    }

    #[test]
    fn unmatched_answers_are_skipped() {
        let responses = BTreeMap::from([("q1", "Dancing"), ("q99", "Anything")]);
        let scores = score_dimensions(&responses, &table());
        assert_eq!(scores, DimensionScores::default());
    }

    #[test]
    fn confidence_uses_configured_question_count_and_caps() {
        let analyzer = PersonalityAnalyzer::new(PersonalityConfig {
            total_scorable_questions: 1,
            ..PersonalityConfig::default()
        });
        let responses = vec![("q3", "Logic"), ("q4", "Spontaneous")];

        let scores = analyzer.score(responses, &table());
        assert_eq!(scores.j_p_responses, 2);
        assert_eq!(scores.confidence_level, 1.0);
    }

    #[test]
    fn validates_config() {
        let config = PersonalityConfig {
            type_margin: -1.0,
            ..PersonalityConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidTypeMargin(-1.0)));
    }
}
