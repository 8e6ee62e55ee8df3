use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}+#]+").unwrap());

/// Topic clusters used for semantic skill matches.
///
/// Two skills are semantically related when both resolve into at least one
/// common cluster. Multi-word terms match as substrings, single-word terms
/// only match whole tokens so that "ui" does not fire on "build".
static TOPIC_CLUSTERS: LazyLock<Vec<(&'static str, Vec<&'static str>)>> = LazyLock::new(|| {
    let clusters: &[(&str, &[&str])] = &[
        (
            "javascript",
            &[
                "javascript",
                "typescript",
                "react",
                "vue",
                "angular",
                "svelte",
                "node",
                "nodejs",
                "frontend",
                "front end",
                "web development",
                "html",
                "css",
            ],
        ),
        (
            "python",
            &[
                "python",
                "django",
                "flask",
                "pandas",
                "numpy",
                "data science",
                "machine learning",
            ],
        ),
        (
            "data",
            &[
                "sql",
                "excel",
                "tableau",
                "power bi",
                "statistics",
                "data analysis",
                "data visualization",
                "analytics",
                "data science",
            ],
        ),
        (
            "cloud",
            &[
                "aws",
                "azure",
                "gcp",
                "cloud",
                "docker",
                "kubernetes",
                "devops",
                "terraform",
                "linux",
            ],
        ),
        (
            "design",
            &[
                "figma",
                "ui",
                "ux",
                "user experience",
                "user interface",
                "graphic design",
                "photoshop",
                "illustrator",
                "sketch",
            ],
        ),
        (
            "management",
            &[
                "leadership",
                "project management",
                "team management",
                "people management",
                "agile",
                "scrum",
                "stakeholder management",
                "strategy",
            ],
        ),
        (
            "communication",
            &[
                "communication",
                "public speaking",
                "writing",
                "presentation",
                "negotiation",
                "customer service",
            ],
        ),
        (
            "healthcare",
            &[
                "patient care",
                "nursing",
                "clinical",
                "medical",
                "healthcare",
                "first aid",
                "pharmacology",
            ],
        ),
        (
            "finance",
            &[
                "accounting",
                "finance",
                "financial analysis",
                "budgeting",
                "bookkeeping",
                "auditing",
                "tax",
            ],
        ),
        (
            "marketing",
            &[
                "marketing",
                "seo",
                "social media",
                "content creation",
                "branding",
                "advertising",
                "copywriting",
            ],
        ),
        (
            "education",
            &[
                "teaching",
                "tutoring",
                "curriculum",
                "instruction",
                "mentoring",
                "training",
            ],
        ),
        (
            "engineering",
            &[
                "cad",
                "autocad",
                "solidworks",
                "mechanical",
                "electrical",
                "manufacturing",
                "circuit design",
            ],
        ),
    ];

    clusters
        .iter()
        .map(|(name, terms)| (*name, terms.to_vec()))
        .collect()
});

/// NFKC-normalize, trim and lowercase.
pub fn normalize_text(input: &str) -> String {
    input.nfkc().collect::<String>().trim().to_lowercase()
}

/// Words of the normalized input with strictly more than `min_exclusive` chars.
pub fn word_set(input: &str, min_exclusive: usize) -> HashSet<String> {
    let normalized = normalize_text(input);
    WORD.find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .filter(|w| w.chars().count() > min_exclusive)
        .collect()
}

/// Jaccard index of two word sets. Two empty sets score 0.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Word-level Jaccard similarity of two free-text strings.
pub fn token_jaccard(a: &str, b: &str, min_exclusive: usize) -> f64 {
    jaccard(&word_set(a, min_exclusive), &word_set(b, min_exclusive))
}

/// Names of every topic cluster the skill resolves into.
pub fn topic_clusters(skill: &str) -> BTreeSet<&'static str> {
    let normalized = normalize_text(skill);
    if normalized.is_empty() {
        return BTreeSet::new();
    }
    let words = word_set(&normalized, 0);

    TOPIC_CLUSTERS
        .iter()
        .filter(|(_, terms)| {
            terms.iter().any(|term| {
                if term.contains(' ') {
                    normalized.contains(term)
                } else {
                    normalized == *term || words.contains(*term)
                }
            })
        })
        .map(|(name, _)| *name)
        .collect()
}

/// True when both skills share at least one topic cluster.
pub fn share_topic_cluster(a: &str, b: &str) -> bool {
    let left = topic_clusters(a);
    if left.is_empty() {
        return false;
    }
    topic_clusters(b).iter().any(|c| left.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_fullwidth_and_case() {
        assert_eq!(normalize_text("  ＪａｖａＳｃｒｉｐｔ "), "javascript");
        assert_eq!(normalize_text("Patient Care"), "patient care");
    }

    #[test]
    fn word_set_drops_short_words() {
        let words = word_set("VP of Data & AI", 2);
        assert!(words.contains("data"));
        assert!(!words.contains("of"));
        assert!(!words.contains("ai"));
    }

    #[test]
    fn jaccard_of_empty_sets_is_zero() {
        assert_eq!(token_jaccard("", "", 0), 0.0);
        assert!((token_jaccard("data analyst", "data analyst", 0) - 1.0).abs() < f64::EPSILON);
        assert!((token_jaccard("senior data analyst", "data analyst", 0) - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn resolves_related_skills_into_shared_cluster() {
        assert!(share_topic_cluster("JavaScript", "React"));
        assert!(share_topic_cluster("Python", "Machine Learning"));
        assert!(!share_topic_cluster("JavaScript", "Patient Care"));
    }

    #[test]
    fn single_word_terms_require_whole_tokens() {
        assert!(topic_clusters("build tooling").is_empty());
        assert!(topic_clusters("UI design").contains("design"));
    }
}
