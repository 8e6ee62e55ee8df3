use crate::skill_normalizer::{jaccard, word_set};

/// Role keyword buckets. Two titles sharing a bucket get the role bonus.
const ROLE_BUCKETS: [&[&str]; 5] = [
    // seniority
    &["senior", "lead", "principal", "staff", "head", "chief"],
    // entry level
    &["junior", "entry", "associate", "assistant", "intern", "trainee", "graduate"],
    // management
    &["manager", "director", "supervisor", "coordinator", "administrator"],
    // analyst type
    &["analyst", "specialist", "consultant", "advisor", "researcher"],
    // engineering type
    &["engineer", "developer", "architect", "programmer", "technician"],
];

const ROLE_BONUS: f64 = 0.3;
const BONUS_MIN_BASE: f64 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct TitleSimilarity {
    pub score: f64,
    pub base: f64,
    pub shares_role_bucket: bool,
}

/// Title similarity (0.0〜1.0): word Jaccard over words longer than two
/// characters, plus a bonus when both titles hit the same role bucket and the
/// base overlap already exceeds 0.15.
pub fn title_similarity(career_title: &str, target_title: &str) -> TitleSimilarity {
    let career_words = word_set(career_title, 2);
    let target_words = word_set(target_title, 2);
    let base = jaccard(&career_words, &target_words);

    let shares_role_bucket = ROLE_BUCKETS.iter().any(|bucket| {
        bucket.iter().any(|kw| career_words.contains(*kw))
            && bucket.iter().any(|kw| target_words.contains(*kw))
    });

    let score = if shares_role_bucket && base > BONUS_MIN_BASE {
        (base + ROLE_BONUS).min(1.0)
    } else {
        base
    };

    TitleSimilarity {
        score,
        base,
        shares_role_bucket,
    }
}

/// Reason fragment for a title score, None when the overlap is negligible.
pub fn describe_title(score: f64) -> Option<String> {
    if score >= 0.7 {
        Some("Very similar job title".into())
    } else if score >= 0.4 {
        Some("Similar job title".into())
    } else if score > BONUS_MIN_BASE {
        Some("Related job title".into())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_titles_cap_at_one() {
        let sim = title_similarity("Senior Data Analyst", "senior data analyst");
        assert!((sim.base - 1.0).abs() < f64::EPSILON);
        assert_eq!(sim.score, 1.0);
    }

    #[test]
    fn shared_bucket_adds_bonus_above_base_threshold() {
        let sim = title_similarity("Software Engineer", "Software Developer");
        // {software, engineer} vs {software, developer}: 1/3
        assert!((sim.base - 1.0 / 3.0).abs() < 1e-9);
        assert!(sim.shares_role_bucket);
        assert!((sim.score - (1.0 / 3.0 + 0.3)).abs() < 1e-9);
    }

    #[test]
    fn bonus_is_skipped_without_base_overlap() {
        let sim = title_similarity("Software Engineer", "Frontend Developer");
        assert_eq!(sim.base, 0.0);
        assert!(sim.shares_role_bucket);
        assert_eq!(sim.score, 0.0);
    }

    #[test]
    fn describes_title_tiers() {
        assert_eq!(describe_title(0.9).as_deref(), Some("Very similar job title"));
        assert_eq!(describe_title(0.5).as_deref(), Some("Similar job title"));
        assert_eq!(describe_title(0.2).as_deref(), Some("Related job title"));
        assert_eq!(describe_title(0.1), None);
    }
}
