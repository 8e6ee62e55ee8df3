use serde::Serialize;

use super::{
    education::{describe_education, education_fit},
    industry::{describe_industry, industry_match},
    skills::{check_skill_overlap, collect_career_skills, SkillMatch},
    title::{describe_title, title_similarity},
    weights::{SimilarityWeights, DEFAULT_WEIGHTS},
};
use crate::{config::env_or, skill_normalizer::normalize_text, CareerRecord};

const MAX_REASONS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityConfig {
    pub weights: SimilarityWeights,
    /// Results must score strictly above this (0.0〜1.0).
    pub min_score: f64,
    /// Maximum number of ranked careers returned.
    pub max_results: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            min_score: 0.25,
            max_results: 5,
        }
    }
}

impl SimilarityConfig {
    /// Defaults overridden by `CG_SIMILARITY_MIN_SCORE` / `CG_SIMILARITY_MAX_RESULTS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_score: env_or("CG_SIMILARITY_MIN_SCORE", defaults.min_score),
            max_results: env_or("CG_SIMILARITY_MAX_RESULTS", defaults.max_results),
            ..defaults
        }
    }
}

/// What the caller is looking for: current skills, current or desired title,
/// and optionally an industry.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityTarget<'a> {
    pub skills: &'a [String],
    pub title: &'a str,
    pub industry: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
    pub score: f64,
    pub reason: Option<String>,
}

impl FactorScore {
    fn new(score: f64, reason: Option<String>) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    pub total: f64,
    pub skills: FactorScore,
    pub title: FactorScore,
    pub industry: FactorScore,
    pub education: FactorScore,
    pub keywords: FactorScore,
    pub skill_matches: Vec<SkillMatch>,
}

impl SimilarityBreakdown {
    /// Reasons in computation order (skills, title, industry, education,
    /// keyword), truncated to the first three. Never sorted by magnitude.
    pub fn match_reasons(&self) -> Vec<String> {
        [
            &self.skills,
            &self.title,
            &self.industry,
            &self.education,
            &self.keywords,
        ]
        .into_iter()
        .filter_map(|factor| factor.reason.clone())
        .take(MAX_REASONS)
        .collect()
    }
}

pub struct CareerSimilarityEngine {
    config: SimilarityConfig,
}

impl CareerSimilarityEngine {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Weighted sum of the five factors, capped at 1.0.
    pub fn calculate_similarity(
        &self,
        career: &CareerRecord,
        target: &SimilarityTarget<'_>,
    ) -> SimilarityBreakdown {
        let (skills, skill_matches) = self.score_skills(career, target);
        let title = self.score_title(career, target);
        let industry = self.score_industry(career, target);
        let education = self.score_education(career);
        let keywords = self.score_keywords(career, target);

        let weights = self.config.weights;
        let total = skills.score * weights.skills
            + title.score * weights.title
            + industry.score * weights.industry
            + education.score * weights.education
            + keywords.score * weights.keywords;

        SimilarityBreakdown {
            total: total.clamp(0.0, 1.0),
            skills,
            title,
            industry,
            education,
            keywords,
            skill_matches,
        }
    }

    fn score_skills(
        &self,
        career: &CareerRecord,
        target: &SimilarityTarget<'_>,
    ) -> (FactorScore, Vec<SkillMatch>) {
        let career_skills =
            collect_career_skills(&career.required_skills, &career.transferable_skills);
        let overlap = check_skill_overlap(&career_skills, target.skills);
        (FactorScore::new(overlap.score, overlap.reason), overlap.matches)
    }

    fn score_title(&self, career: &CareerRecord, target: &SimilarityTarget<'_>) -> FactorScore {
        let similarity = title_similarity(&career.title, target.title);
        FactorScore::new(similarity.score, describe_title(similarity.score))
    }

    fn score_industry(&self, career: &CareerRecord, target: &SimilarityTarget<'_>) -> FactorScore {
        let result = industry_match(
            career.industry.as_deref(),
            &career.description,
            target.industry,
        );
        let reason = describe_industry(&result);
        FactorScore::new(result.score, reason)
    }

    fn score_education(&self, career: &CareerRecord) -> FactorScore {
        let fit = education_fit(&career.required_education);
        let reason = describe_education(&fit);
        FactorScore::new(fit.score, reason)
    }

    /// Fraction of career keywords found in the target title or any target skill.
    fn score_keywords(&self, career: &CareerRecord, target: &SimilarityTarget<'_>) -> FactorScore {
        let keywords: Vec<String> = career
            .keywords
            .iter()
            .map(|k| normalize_text(k))
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return FactorScore::new(0.0, None);
        }

        let haystacks: Vec<String> = std::iter::once(target.title)
            .chain(target.skills.iter().map(|s| s.as_str()))
            .map(normalize_text)
            .filter(|h| !h.is_empty())
            .collect();

        let hits = keywords
            .iter()
            .filter(|kw| haystacks.iter().any(|h| h.contains(kw.as_str())))
            .count();
        if hits == 0 {
            return FactorScore::new(0.0, None);
        }

        let reason = format!(
            "Matches {hits} career {}",
            if hits == 1 { "keyword" } else { "keywords" }
        );
        FactorScore::new(hits as f64 / keywords.len() as f64, Some(reason))
    }
}

impl Default for CareerSimilarityEngine {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engineer() -> CareerRecord {
        CareerRecord {
            id: "c-1".into(),
            title: "Software Engineer".into(),
            description: "Design and build software products".into(),
            required_skills: vec!["JavaScript".into(), "React".into()],
            industry: Some("Technology".into()),
            required_education: vec!["Bachelor's degree".into()],
            keywords: vec!["frontend".into(), "web".into()],
            ..CareerRecord::default()
        }
    }

    fn target_skills() -> Vec<String> {
        vec!["JavaScript".into(), "Frontend Frameworks".into()]
    }

    #[test]
    fn combines_weighted_factors() {
        let engine = CareerSimilarityEngine::default();
        let skills = target_skills();
        let target = SimilarityTarget {
            skills: &skills,
            title: "Frontend Developer",
            industry: Some("Technology"),
        };

        let result = engine.calculate_similarity(&engineer(), &target);

        let expected = result.skills.score * 0.40
            + result.title.score * 0.25
            + result.industry.score * 0.20
            + result.education.score * 0.10
            + result.keywords.score * 0.05;
        assert!((result.total - expected).abs() < 1e-9);
        assert_eq!(result.industry.score, 1.0);
        assert_eq!(result.education.score, 0.8);
        // "frontend" appears in both the title and a skill, "web" in neither
        assert!((result.keywords.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn reasons_keep_computation_order_and_truncate() {
        let engine = CareerSimilarityEngine::default();
        let skills = target_skills();
        let target = SimilarityTarget {
            skills: &skills,
            title: "Frontend Developer",
            industry: Some("Technology"),
        };

        let reasons = engine.calculate_similarity(&engineer(), &target).match_reasons();

        assert_eq!(reasons.len(), 3);
        assert!(reasons[0].contains("skill"));
        assert_eq!(reasons[1], "Same industry");
        assert_eq!(reasons[2], "Compatible education requirements");
    }

    #[test]
    fn neutral_education_still_contributes() {
        let engine = CareerSimilarityEngine::default();
        let career = CareerRecord {
            title: "Nurse".into(),
            required_skills: vec!["Patient Care".into()],
            industry: Some("Healthcare".into()),
            ..CareerRecord::default()
        };
        let skills = vec!["JavaScript".to_string()];
        let target = SimilarityTarget {
            skills: &skills,
            title: "Frontend Developer",
            industry: Some("Technology"),
        };

        let result = engine.calculate_similarity(&career, &target);
        assert!((result.total - 0.05).abs() < 1e-9);
        assert!(result.match_reasons().is_empty());
    }
}
