use std::collections::BTreeSet;

use crate::skill_normalizer::{normalize_text, token_jaccard, word_set};

const DIRECT_MATCH_MIN: f64 = 0.7;
const DESCRIPTION_MATCH_CAP: f64 = 0.8;

/// Industry token → related vocabulary used when industries do not line up directly.
const INDUSTRY_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "technology",
        &["tech", "software", "it", "computer", "digital", "internet", "saas"],
    ),
    ("software", &["technology", "tech", "it", "saas", "digital"]),
    (
        "healthcare",
        &["health", "medical", "hospital", "clinical", "patient", "care"],
    ),
    ("health", &["healthcare", "medical", "hospital", "wellness"]),
    (
        "finance",
        &["financial", "banking", "bank", "investment", "accounting", "insurance"],
    ),
    ("banking", &["finance", "financial", "bank", "lending"]),
    (
        "education",
        &["school", "teaching", "academic", "university", "learning", "training"],
    ),
    (
        "manufacturing",
        &["production", "factory", "industrial", "assembly", "engineering"],
    ),
    (
        "retail",
        &["sales", "store", "ecommerce", "consumer", "merchandising"],
    ),
    (
        "marketing",
        &["advertising", "media", "branding", "communications", "digital"],
    ),
    ("media", &["entertainment", "publishing", "broadcast", "journalism"]),
    (
        "government",
        &["public", "policy", "administration", "civil", "municipal"],
    ),
    (
        "construction",
        &["building", "architecture", "engineering", "trades"],
    ),
    (
        "hospitality",
        &["hotel", "tourism", "restaurant", "travel", "food"],
    ),
];

#[derive(Debug, Clone, PartialEq)]
pub struct IndustryMatch {
    pub score: f64,
    pub direct: bool,
}

/// Target industry tokens plus their synonym expansion, sorted for determinism.
pub fn expand_industry_keywords(industry: &str) -> BTreeSet<String> {
    let mut keywords: BTreeSet<String> = word_set(industry, 1).into_iter().collect();
    let base: Vec<String> = keywords.iter().cloned().collect();

    for token in &base {
        if let Some((_, synonyms)) = INDUSTRY_SYNONYMS.iter().find(|(key, _)| key == token) {
            keywords.extend(synonyms.iter().map(|s| s.to_string()));
        }
    }
    keywords
}

/// Industry score (0.0〜1.0).
///
/// A direct industry comparison wins when the two industry strings overlap
/// above 0.7. Otherwise the expanded target vocabulary is searched in the
/// career description and scored by coverage, capped at 0.8.
pub fn industry_match(
    career_industry: Option<&str>,
    career_description: &str,
    target_industry: Option<&str>,
) -> IndustryMatch {
    let Some(target) = target_industry.filter(|t| !t.trim().is_empty()) else {
        return IndustryMatch {
            score: 0.0,
            direct: false,
        };
    };

    if let Some(career) = career_industry.filter(|c| !c.trim().is_empty()) {
        let similarity = token_jaccard(career, target, 0);
        if similarity > DIRECT_MATCH_MIN {
            return IndustryMatch {
                score: similarity,
                direct: true,
            };
        }
    }

    let keywords = expand_industry_keywords(target);
    if keywords.is_empty() {
        return IndustryMatch {
            score: 0.0,
            direct: false,
        };
    }

    let description_words = word_set(career_description, 1);
    let description = normalize_text(career_description);
    let hits = keywords
        .iter()
        .filter(|kw| description_words.contains(*kw) || (kw.len() > 3 && description.contains(kw.as_str())))
        .count();

    let coverage = hits as f64 / keywords.len() as f64;
    IndustryMatch {
        score: coverage.min(DESCRIPTION_MATCH_CAP),
        direct: false,
    }
}

pub fn describe_industry(result: &IndustryMatch) -> Option<String> {
    if result.direct {
        Some("Same industry".into())
    } else if result.score > 0.0 {
        Some("Related industry background".into())
    } else {
        None
    }
}
