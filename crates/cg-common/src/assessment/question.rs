use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    MultipleSelect,
    Scale,
    Text,
}

impl QuestionType {
    pub fn requires_options(self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::MultipleSelect)
    }
}

/// Funnel stage a question belongs to, in presentation order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PathwayTier {
    ProfileDetection,
    CareerChoice,
    SubjectCluster,
    Refinement,
    Practical,
}

/// Coarse life-stage classification ("high_school", "career_changer", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileType(String);

impl ProfileType {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProfileType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Questions with `order` at or below this are profile detection questions
/// whatever tier they are tagged with.
pub const PROFILE_DETECTION_MAX_ORDER: i32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentQuestion {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    pub order: i32,
    pub pathway_tier: PathwayTier,
    #[serde(rename = "profileType", default)]
    pub profile_types: BTreeSet<ProfileType>,
    #[serde(default)]
    pub related_pathway_ids: BTreeSet<String>,
    #[serde(default)]
    pub related_cluster_ids: BTreeSet<String>,
}

impl AssessmentQuestion {
    pub fn is_profile_detection(&self) -> bool {
        self.pathway_tier == PathwayTier::ProfileDetection
            || self.order <= PROFILE_DETECTION_MAX_ORDER
    }

    /// Tier used for selection: early-order questions always count as profile detection.
    pub fn effective_tier(&self) -> PathwayTier {
        if self.is_profile_detection() {
            PathwayTier::ProfileDetection
        } else {
            self.pathway_tier
        }
    }

    /// Unrestricted questions apply to every profile.
    pub fn applies_to_profile(&self, profile: &ProfileType) -> bool {
        self.profile_types.is_empty() || self.profile_types.contains(profile)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
    Number(f64),
}

impl Answer {
    /// Selected option labels (a text answer counts as one label).
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Answer::Text(text) => vec![text.as_str()],
            Answer::Choices(choices) => choices.iter().map(String::as_str).collect(),
            Answer::Number(_) => Vec::new(),
        }
    }

    /// Single scalar value used for answer-weight lookups; None for multi-selects.
    pub fn scalar_value(&self) -> Option<String> {
        match self {
            Answer::Text(text) => Some(text.clone()),
            Answer::Choices(choices) if choices.len() == 1 => Some(choices[0].clone()),
            Answer::Choices(_) => None,
            Answer::Number(n) if n.fract() == 0.0 && n.is_finite() => Some(format!("{n:.0}")),
            Answer::Number(n) => Some(n.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: Answer,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_field_names() {
        let question: AssessmentQuestion = serde_json::from_str(
            r#"{
                "id": "q5",
                "title": "Which subjects do you enjoy?",
                "type": "multiple_select",
                "options": ["Biology", "Physics"],
                "order": 5,
                "pathway_tier": "subject_cluster",
                "profileType": ["high_school"],
                "related_pathway_ids": ["p-stem"]
            }"#,
        )
        .expect("valid question");

        assert_eq!(question.question_type, QuestionType::MultipleSelect);
        assert_eq!(question.pathway_tier, PathwayTier::SubjectCluster);
        assert!(question.applies_to_profile(&ProfileType::from("high_school")));
        assert!(!question.applies_to_profile(&ProfileType::from("career_changer")));
        assert!(question.related_cluster_ids.is_empty());
    }

    #[test]
    fn early_order_counts_as_profile_detection() {
        let mut question: AssessmentQuestion = serde_json::from_value(serde_json::json!({
            "id": "q2",
            "title": "What are you studying?",
            "type": "text",
            "order": 2,
            "pathway_tier": "career_choice"
        }))
        .expect("valid question");
        assert_eq!(question.effective_tier(), PathwayTier::ProfileDetection);

        question.order = 3;
        assert_eq!(question.effective_tier(), PathwayTier::CareerChoice);
    }

    #[test]
    fn answers_deserialize_untagged() {
        let text: Answer = serde_json::from_str(r#""Nursing""#).expect("text");
        let choices: Answer = serde_json::from_str(r#"["A","B"]"#).expect("choices");
        let number: Answer = serde_json::from_str("4").expect("number");

        assert_eq!(text.labels(), vec!["Nursing"]);
        assert_eq!(choices.labels(), vec!["A", "B"]);
        assert_eq!(number.scalar_value().as_deref(), Some("4"));
        assert_eq!(choices.scalar_value(), None);
        assert_eq!(Answer::Number(2.5).scalar_value().as_deref(), Some("2.5"));
    }
}
