use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::{
    bank::QuestionBank,
    question::{Answer, AssessmentQuestion, PathwayTier, ProfileType, QuestionResponse, QuestionType},
};
use crate::{session_id, CatalogEntry};

/// Assigns a profile from the first answer of an assessment.
pub trait ProfileClassifier {
    fn classify(&self, question: &AssessmentQuestion, response: &QuestionResponse) -> ProfileType;
}

impl<F> ProfileClassifier for F
where
    F: Fn(&AssessmentQuestion, &QuestionResponse) -> ProfileType,
{
    fn classify(&self, question: &AssessmentQuestion, response: &QuestionResponse) -> ProfileType {
        self(question, response)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ResponseError {
    #[error("unknown question id: {0}")]
    UnknownQuestion(String),
    #[error("answer to {question_id} does not fit a {expected} question")]
    ShapeMismatch {
        question_id: String,
        expected: QuestionType,
    },
    #[error("answer to {question_id} is not one of its options: {option}")]
    UnknownOption { question_id: String, option: String },
}

/// Pathway and subject cluster catalogs used to turn option labels into ids.
#[derive(Debug, Clone, Default)]
pub struct SelectionCatalog {
    pub pathways: Vec<CatalogEntry>,
    pub clusters: Vec<CatalogEntry>,
}

impl SelectionCatalog {
    pub fn new(pathways: Vec<CatalogEntry>, clusters: Vec<CatalogEntry>) -> Self {
        Self { pathways, clusters }
    }

    fn find<'a>(entries: &'a [CatalogEntry], label: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|entry| entry.title == label)
            .map(|entry| entry.id.as_str())
    }

    /// Labels with no pathway of that exact title are dropped.
    fn resolve_pathways(&self, labels: &[&str]) -> BTreeSet<String> {
        labels
            .iter()
            .filter_map(|label| Self::find(&self.pathways, label))
            .map(str::to_string)
            .collect()
    }

    /// Unknown cluster labels are kept verbatim as ids.
    fn resolve_clusters(&self, labels: &[&str]) -> BTreeSet<String> {
        labels
            .iter()
            .map(|label| Self::find(&self.clusters, label).unwrap_or(*label).to_string())
            .collect()
    }
}

fn validate_answer(question: &AssessmentQuestion, answer: &Answer) -> Result<(), ResponseError> {
    let shape_ok = matches!(
        (question.question_type, answer),
        (QuestionType::MultipleChoice, Answer::Text(_))
            | (QuestionType::MultipleSelect, Answer::Choices(_))
            | (QuestionType::Scale, Answer::Number(_))
            | (QuestionType::Text, Answer::Text(_))
    );
    if !shape_ok {
        return Err(ResponseError::ShapeMismatch {
            question_id: question.id.clone(),
            expected: question.question_type,
        });
    }

    if question.question_type.requires_options() {
        if let Some(option) = answer
            .labels()
            .into_iter()
            .find(|label| !question.options.iter().any(|o| o == *label))
        {
            return Err(ResponseError::UnknownOption {
                question_id: question.id.clone(),
                option: option.to_string(),
            });
        }
    }
    Ok(())
}

/// State of one user's walk through the question funnel.
///
/// The session holds no reference to the bank or catalogs, so it can be
/// serialized between requests and replayed against a freshly loaded bank.
/// Questions stay visible once shown, even when a later answer narrows the
/// pathway selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSession {
    pub session_id: String,
    responses: Vec<QuestionResponse>,
    detected_profile: Option<ProfileType>,
    selected_pathway_ids: BTreeSet<String>,
    selected_cluster_ids: BTreeSet<String>,
    #[serde(default)]
    shown_question_ids: BTreeSet<String>,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::with_id(session_id::generate())
    }

    pub fn with_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            responses: Vec::new(),
            detected_profile: None,
            selected_pathway_ids: BTreeSet::new(),
            selected_cluster_ids: BTreeSet::new(),
            shown_question_ids: BTreeSet::new(),
        }
    }

    pub fn responses(&self) -> &[QuestionResponse] {
        &self.responses
    }

    pub fn response_for(&self, question_id: &str) -> Option<&QuestionResponse> {
        self.responses.iter().find(|r| r.question_id == question_id)
    }

    pub fn detected_profile(&self) -> Option<&ProfileType> {
        self.detected_profile.as_ref()
    }

    pub fn selected_pathway_ids(&self) -> &BTreeSet<String> {
        &self.selected_pathway_ids
    }

    pub fn selected_cluster_ids(&self) -> &BTreeSet<String> {
        &self.selected_cluster_ids
    }

    /// Record (or overwrite) the answer to one question and update the
    /// profile, pathway and cluster selections it drives.
    pub fn record_response(
        &mut self,
        bank: &QuestionBank,
        catalog: &SelectionCatalog,
        classifier: &dyn ProfileClassifier,
        response: QuestionResponse,
    ) -> Result<(), ResponseError> {
        let question = bank
            .get(&response.question_id)
            .ok_or_else(|| ResponseError::UnknownQuestion(response.question_id.clone()))?;
        validate_answer(question, &response.answer)?;

        match question.effective_tier() {
            PathwayTier::CareerChoice => {
                self.selected_pathway_ids = catalog.resolve_pathways(&response.answer.labels());
            }
            PathwayTier::SubjectCluster => {
                let clusters = catalog.resolve_clusters(&response.answer.labels());
                self.selected_cluster_ids.extend(clusters);
            }
            _ => {}
        }

        if self.detected_profile.is_none() {
            let profile = classifier.classify(question, &response);
            info!(
                session_id = %self.session_id,
                question_id = %question.id,
                profile = %profile,
                "detected profile"
            );
            self.detected_profile = Some(profile);
        }

        debug!(
            session_id = %self.session_id,
            question_id = %response.question_id,
            pathways = self.selected_pathway_ids.len(),
            clusters = self.selected_cluster_ids.len(),
            "recorded response"
        );
        match self
            .responses
            .iter_mut()
            .find(|r| r.question_id == response.question_id)
        {
            Some(existing) => *existing = response,
            None => self.responses.push(response),
        }

        let shown: Vec<String> = self
            .visible_questions(bank)
            .iter()
            .map(|q| q.id.clone())
            .collect();
        self.shown_question_ids.extend(shown);
        Ok(())
    }

    /// Questions selected for the current state plus every question shown
    /// earlier in the session, grouped by tier and ordered by `order`.
    pub fn visible_questions<'a>(&self, bank: &'a QuestionBank) -> Vec<&'a AssessmentQuestion> {
        let current: BTreeSet<&str> = bank
            .visible(
                self.detected_profile.as_ref(),
                &self.selected_pathway_ids,
                &self.selected_cluster_ids,
            )
            .into_iter()
            .map(|q| q.id.as_str())
            .collect();

        let mut visible: Vec<&AssessmentQuestion> = bank
            .questions()
            .iter()
            .filter(|q| {
                current.contains(q.id.as_str()) || self.shown_question_ids.contains(&q.id)
            })
            .collect();
        visible.sort_by_key(|q| (q.effective_tier(), q.order));
        visible
    }

    /// First visible question without a recorded answer.
    pub fn next_question<'a>(&self, bank: &'a QuestionBank) -> Option<&'a AssessmentQuestion> {
        self.visible_questions(bank)
            .into_iter()
            .find(|q| self.response_for(&q.id).is_none())
    }

    /// `questionId -> answer value` map for personality scoring. Multi-select
    /// answers have no single value and are left out.
    pub fn answers_for_scoring(&self) -> BTreeMap<String, String> {
        self.responses
            .iter()
            .filter_map(|r| {
                r.answer
                    .scalar_value()
                    .map(|value| (r.question_id.clone(), value))
            })
            .collect()
    }
}
