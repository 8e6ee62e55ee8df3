use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::scoring::{CareerSimilarityEngine, SimilarityConfig, SimilarityTarget};
use crate::CareerRecord;

/// A career record with its similarity score and up to three match reasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCareer {
    #[serde(flatten)]
    pub career: CareerRecord,
    pub similarity_score: f64,
    pub match_reasons: Vec<String>,
}

pub struct CareerRanker {
    engine: CareerSimilarityEngine,
}

impl CareerRanker {
    pub fn new(config: SimilarityConfig) -> Self {
        Self {
            engine: CareerSimilarityEngine::new(config),
        }
    }

    /// Score every career in the pool, keep those strictly above the minimum
    /// score, and return the best `max_results` in descending order. Equal
    /// scores keep their pool order.
    pub fn rank(&self, pool: &[CareerRecord], target: &SimilarityTarget<'_>) -> Vec<ScoredCareer> {
        let config = self.engine.config();

        let mut ranked: Vec<ScoredCareer> = pool
            .iter()
            .filter_map(|career| {
                let breakdown = self.engine.calculate_similarity(career, target);
                debug!(
                    career_id = %career.id,
                    total = breakdown.total,
                    skills = breakdown.skills.score,
                    title = breakdown.title.score,
                    industry = breakdown.industry.score,
                    "scored career"
                );

                (breakdown.total > config.min_score).then(|| ScoredCareer {
                    career: career.clone(),
                    similarity_score: breakdown.total,
                    match_reasons: breakdown.match_reasons(),
                })
            })
            .collect();

        // sort_by is stable, so ties stay in pool order
        ranked.sort_by(|a, b| {
            b.similarity_score
                .partial_cmp(&a.similarity_score)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(config.max_results);
        ranked
    }
}

impl Default for CareerRanker {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

/// Rank the pool against a target with the default configuration.
pub fn rank_similar_careers(
    pool: &[CareerRecord],
    target_skills: &[String],
    target_title: &str,
    target_industry: Option<&str>,
) -> Vec<ScoredCareer> {
    let target = SimilarityTarget {
        skills: target_skills,
        title: target_title,
        industry: target_industry,
    };
    CareerRanker::default().rank(pool, &target)
}
