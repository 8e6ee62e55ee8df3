use cg_common::{
    skill_normalizer::normalize_text, AssessmentQuestion, ProfileClassifier, ProfileType,
    QuestionResponse,
};

/// Profile assigned when no rule matches the first answer.
pub const FALLBACK_PROFILE: &str = "general";

/// (profile, phrases). First rule with a phrase contained in the normalized
/// answer wins, so more specific rules come first.
const PROFILE_RULES: &[(&str, &[&str])] = &[
    (
        "career_changer",
        &[
            "career change",
            "changing careers",
            "switch careers",
            "switching",
            "new career",
            "career changer",
        ],
    ),
    (
        "high_school",
        &["high school", "secondary school", "grade 1", "sixth form", "gcse"],
    ),
    (
        "undergraduate",
        &[
            "undergraduate",
            "university",
            "college",
            "bachelor",
            "degree",
        ],
    ),
];

/// Keyword classifier over the first answer's text.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordProfileClassifier;

impl ProfileClassifier for KeywordProfileClassifier {
    fn classify(&self, _question: &AssessmentQuestion, response: &QuestionResponse) -> ProfileType {
        let text = normalize_text(&response.answer.labels().join(" "));
        PROFILE_RULES
            .iter()
            .find(|(_, phrases)| phrases.iter().any(|phrase| text.contains(phrase)))
            .map(|(profile, _)| ProfileType::from(*profile))
            .unwrap_or_else(|| ProfileType::from(FALLBACK_PROFILE))
    }
}
