pub mod dimensions;
pub mod scoring;
pub mod types;

pub use dimensions::{
    AnswerWeight, AnswerWeightTable, Axis, Dimension, DimensionWeight, WeightTableError,
};
pub use scoring::{score_dimensions, DimensionScores, PersonalityAnalyzer, PersonalityConfig};
pub use types::derive_personality_types;
