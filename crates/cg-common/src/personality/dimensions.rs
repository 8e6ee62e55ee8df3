use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;
use tracing::debug;

/// One pole of a bipolar personality axis.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
pub enum Dimension {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

/// The four bipolar axes, in type-code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    EI,
    SN,
    TF,
    JP,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::EI, Axis::SN, Axis::TF, Axis::JP];

    /// (positive pole, negative pole)
    pub fn poles(self) -> (Dimension, Dimension) {
        match self {
            Axis::EI => (Dimension::E, Dimension::I),
            Axis::SN => (Dimension::S, Dimension::N),
            Axis::TF => (Dimension::T, Dimension::F),
            Axis::JP => (Dimension::J, Dimension::P),
        }
    }
}

impl Dimension {
    pub fn axis(self) -> Axis {
        match self {
            Dimension::E | Dimension::I => Axis::EI,
            Dimension::S | Dimension::N => Axis::SN,
            Dimension::T | Dimension::F => Axis::TF,
            Dimension::J | Dimension::P => Axis::JP,
        }
    }

    /// E, S, T and J add to their axis score; I, N, F and P subtract.
    pub fn is_positive_pole(self) -> bool {
        matches!(
            self,
            Dimension::E | Dimension::S | Dimension::T | Dimension::J
        )
    }

    pub fn letter(self) -> char {
        match self {
            Dimension::E => 'E',
            Dimension::I => 'I',
            Dimension::S => 'S',
            Dimension::N => 'N',
            Dimension::T => 'T',
            Dimension::F => 'F',
            Dimension::J => 'J',
            Dimension::P => 'P',
        }
    }
}

/// Row of the answer weight reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerWeight {
    pub question_id: String,
    pub answer_value: String,
    pub dimension: Dimension,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionWeight {
    pub dimension: Dimension,
    pub weight: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum WeightTableError {
    #[error("answer weight row {index} has an empty question_id")]
    EmptyQuestionId { index: usize },
    #[error("answer weight for question {question_id} has an empty answer_value")]
    EmptyAnswerValue { question_id: String },
    #[error("answer weight for {question_id}/{answer_value} must be positive and finite (got {weight})")]
    InvalidWeight {
        question_id: String,
        answer_value: String,
        weight: f64,
    },
}

/// Answer weights keyed by (question_id, answer_value), validated on construction.
#[derive(Debug, Clone, Default)]
pub struct AnswerWeightTable {
    entries: HashMap<(String, String), Vec<DimensionWeight>>,
    rows: usize,
}

impl AnswerWeightTable {
    pub fn from_rows(rows: Vec<AnswerWeight>) -> Result<Self, WeightTableError> {
        let mut entries: HashMap<(String, String), Vec<DimensionWeight>> = HashMap::new();
        let row_count = rows.len();

        for (index, row) in rows.into_iter().enumerate() {
            if row.question_id.trim().is_empty() {
                return Err(WeightTableError::EmptyQuestionId { index });
            }
            if row.answer_value.is_empty() {
                return Err(WeightTableError::EmptyAnswerValue {
                    question_id: row.question_id,
                });
            }
            if !row.weight.is_finite() || row.weight <= 0.0 {
                return Err(WeightTableError::InvalidWeight {
                    question_id: row.question_id,
                    answer_value: row.answer_value,
                    weight: row.weight,
                });
            }

            entries
                .entry((row.question_id, row.answer_value))
                .or_default()
                .push(DimensionWeight {
                    dimension: row.dimension,
                    weight: row.weight,
                });
        }

        debug!(
            rows = row_count,
            answers = entries.len(),
            "loaded answer weight table"
        );
        Ok(Self {
            entries,
            rows: row_count,
        })
    }

    /// Every weight attached to this answer. Empty when nothing matches.
    pub fn lookup(&self, question_id: &str, answer_value: &str) -> &[DimensionWeight] {
        self.entries
            .get(&(question_id.to_string(), answer_value.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
