pub mod assessment;
pub mod config;
pub mod logging;
pub mod matching;
pub mod personality;
pub mod repository;
pub mod session_id;
pub mod skill_normalizer;

use serde::{Deserialize, Serialize};

pub use assessment::{
    select_visible_questions, Answer, AssessmentQuestion, AssessmentSession, PathwayTier,
    ProfileClassifier, ProfileType, QuestionBank, QuestionResponse, QuestionType, SelectionCatalog,
};
pub use matching::{rank_similar_careers, ScoredCareer, SimilarityConfig};
pub use personality::{
    derive_personality_types, score_dimensions, AnswerWeight, AnswerWeightTable, Dimension,
    DimensionScores, PersonalityConfig,
};
pub use repository::{CareerDataSource, DataSourceError, InMemoryDataSource, JsonDirDataSource};

/// Career record consumed by the similarity scorer. Supplied per call, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub transferable_skills: Vec<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub required_education: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Catalog entry used to resolve an option label into a pathway or cluster id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
}
