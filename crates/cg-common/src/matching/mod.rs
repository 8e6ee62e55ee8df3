pub mod education;
pub mod industry;
pub mod pipeline;
pub mod scoring;
pub mod skills;
pub mod title;
pub mod weights;

pub use pipeline::{rank_similar_careers, CareerRanker, ScoredCareer};
pub use scoring::{
    CareerSimilarityEngine, FactorScore, SimilarityBreakdown, SimilarityConfig, SimilarityTarget,
};
pub use skills::{MatchType, SkillMatch};
pub use weights::{SimilarityWeights, DEFAULT_WEIGHTS};
