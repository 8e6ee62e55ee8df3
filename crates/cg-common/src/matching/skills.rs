use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::skill_normalizer::{normalize_text, share_topic_cluster, token_jaccard};

const EXACT_SCORE: f64 = 1.0;
const PARTIAL_SCORE: f64 = 0.8;
const SEMANTIC_SCORE: f64 = 0.6;
const FUZZY_MIN_SIMILARITY: f64 = 0.7;
const FUZZY_FACTOR: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MatchType {
    Exact,
    Partial,
    Semantic,
}

/// One career skill matched against the target skill set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub skill: String,
    pub match_type: MatchType,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillOverlapResult {
    pub score: f64,
    pub matches: Vec<SkillMatch>,
    pub reason: Option<String>,
}

/// Classify a single (career skill, target skill) pair.
///
/// Checks run from strongest to weakest: exact, containment, shared topic
/// cluster, then word-level Jaccard. Fuzzy hits are reported as semantic.
pub fn classify_skill_pair(career_skill: &str, target_skill: &str) -> Option<(MatchType, f64)> {
    let career = normalize_text(career_skill);
    let target = normalize_text(target_skill);
    if career.is_empty() || target.is_empty() {
        return None;
    }

    if career == target {
        return Some((MatchType::Exact, EXACT_SCORE));
    }
    if career.contains(&target) || target.contains(&career) {
        return Some((MatchType::Partial, PARTIAL_SCORE));
    }
    if share_topic_cluster(&career, &target) {
        return Some((MatchType::Semantic, SEMANTIC_SCORE));
    }

    let similarity = token_jaccard(&career, &target, 0);
    if similarity > FUZZY_MIN_SIMILARITY {
        return Some((MatchType::Semantic, similarity * FUZZY_FACTOR));
    }

    None
}

/// Required skills followed by transferable ones, de-duplicated case-insensitively.
pub fn collect_career_skills<'a>(required: &'a [String], transferable: &'a [String]) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    required
        .iter()
        .chain(transferable.iter())
        .map(|s| s.as_str())
        .filter(|s| !s.trim().is_empty())
        .filter(|s| seen.insert(normalize_text(s)))
        .collect()
}

/// Skill overlap between a career and the target skill set (0.0〜1.0).
///
/// Every career skill matches at most once: the first target skill that
/// qualifies wins. The summed match scores are normalized by
/// `max(target skill count, match count)` and capped at 1.0.
pub fn check_skill_overlap(career_skills: &[&str], target_skills: &[String]) -> SkillOverlapResult {
    let targets: Vec<&str> = target_skills
        .iter()
        .map(|s| s.as_str())
        .filter(|s| !s.trim().is_empty())
        .collect();

    let matches: Vec<SkillMatch> = career_skills
        .iter()
        .filter_map(|career_skill| {
            targets.iter().find_map(|target| {
                classify_skill_pair(career_skill, target).map(|(match_type, score)| SkillMatch {
                    skill: (*career_skill).to_string(),
                    match_type,
                    score,
                })
            })
        })
        .collect();

    let denominator = targets.len().max(matches.len());
    if denominator == 0 {
        return SkillOverlapResult {
            score: 0.0,
            matches,
            reason: None,
        };
    }

    let total: f64 = matches.iter().map(|m| m.score).sum();
    let score = (total / denominator as f64).min(1.0);
    let reason = describe_matches(&matches);

    SkillOverlapResult {
        score,
        matches,
        reason,
    }
}

fn describe_matches(matches: &[SkillMatch]) -> Option<String> {
    let count = |kind: MatchType| matches.iter().filter(|m| m.match_type == kind).count();
    let exact = count(MatchType::Exact);
    let partial = count(MatchType::Partial);
    let semantic = count(MatchType::Semantic);

    let mut parts = Vec::new();
    if exact > 0 {
        parts.push(format!("{exact} exact skill {}", plural(exact, "match", "matches")));
    }
    if partial > 0 {
        parts.push(format!("{partial} partial skill {}", plural(partial, "match", "matches")));
    }
    if semantic > 0 {
        parts.push(format!("{semantic} related {}", plural(semantic, "skill", "skills")));
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn classifies_exact_partial_and_semantic_pairs() {
        assert_eq!(
            classify_skill_pair(" Python ", "python"),
            Some((MatchType::Exact, 1.0))
        );
        assert_eq!(
            classify_skill_pair("Data Analysis", "analysis"),
            Some((MatchType::Partial, 0.8))
        );
        assert_eq!(
            classify_skill_pair("React", "JavaScript"),
            Some((MatchType::Semantic, 0.6))
        );
        assert_eq!(classify_skill_pair("Patient Care", "JavaScript"), None);
        assert_eq!(classify_skill_pair("", "JavaScript"), None);
    }

    #[test]
    fn fuzzy_pairs_need_high_token_overlap() {
        let (kind, score) =
            classify_skill_pair("quality control inspection", "inspection quality control")
                .expect("same words in a different order");
        assert_eq!(kind, MatchType::Semantic);
        assert!((score - 0.7).abs() < 1e-9);

        assert_eq!(classify_skill_pair("quality control", "budget control"), None);
    }

    #[test]
    fn each_career_skill_matches_once() {
        let result = check_skill_overlap(&["JavaScript"], &strings(&["JavaScript", "javascript"]));

        assert_eq!(result.matches.len(), 1);
        assert!((result.score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn normalizes_by_larger_of_targets_and_matches() {
        let result = check_skill_overlap(&["JavaScript", "React"], &strings(&["JavaScript"]));

        assert_eq!(result.matches.len(), 2);
        assert!((result.score - 0.8).abs() < 1e-9);
        assert_eq!(
            result.reason.as_deref(),
            Some("1 exact skill match, 1 related skill")
        );
    }

    #[test]
    fn empty_targets_score_zero_without_reason() {
        let result = check_skill_overlap(&["Rust"], &[]);
        assert_eq!(result.score, 0.0);
        assert!(result.reason.is_none());
    }

    #[test]
    fn collects_required_then_transferable_without_duplicates() {
        let required = strings(&["SQL", "Excel"]);
        let transferable = strings(&["excel", "Communication", " "]);

        assert_eq!(
            collect_career_skills(&required, &transferable),
            vec!["SQL", "Excel", "Communication"]
        );
    }
}
