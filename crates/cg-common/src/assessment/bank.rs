use std::collections::{BTreeSet, HashMap};

use thiserror::Error;
use tracing::{debug, warn};

use super::{
    flow::select_visible_questions,
    question::{AssessmentQuestion, PathwayTier, ProfileType},
};

#[derive(Debug, Error, PartialEq)]
pub enum QuestionBankError {
    #[error("question bank is empty")]
    Empty,
    #[error("question bank has no profile detection questions; no profile could ever be detected")]
    NoProfileDetection,
    #[error("question at position {index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate question id: {0}")]
    DuplicateId(String),
    #[error("{question_type} question {question_id} has no options")]
    MissingOptions {
        question_id: String,
        question_type: String,
    },
}

/// Validated, id-indexed set of assessment questions.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<AssessmentQuestion>,
    by_id: HashMap<String, usize>,
}

impl QuestionBank {
    pub fn new(questions: Vec<AssessmentQuestion>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }

        let mut by_id = HashMap::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            if question.id.trim().is_empty() {
                return Err(QuestionBankError::EmptyId { index });
            }
            if by_id.insert(question.id.clone(), index).is_some() {
                return Err(QuestionBankError::DuplicateId(question.id.clone()));
            }
            if question.question_type.requires_options() && question.options.is_empty() {
                return Err(QuestionBankError::MissingOptions {
                    question_id: question.id.clone(),
                    question_type: question.question_type.as_ref().to_string(),
                });
            }
            if question.pathway_tier == PathwayTier::SubjectCluster
                && !question.is_profile_detection()
                && question.related_pathway_ids.is_empty()
            {
                warn!(
                    question_id = %question.id,
                    "subject cluster question has no related pathways and can never be shown"
                );
            }
        }

        if !questions.iter().any(AssessmentQuestion::is_profile_detection) {
            return Err(QuestionBankError::NoProfileDetection);
        }

        debug!(questions = questions.len(), "loaded question bank");
        Ok(Self { questions, by_id })
    }

    pub fn questions(&self) -> &[AssessmentQuestion] {
        &self.questions
    }

    pub fn get(&self, id: &str) -> Option<&AssessmentQuestion> {
        self.by_id.get(id).map(|index| &self.questions[*index])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn visible(
        &self,
        detected_profile: Option<&ProfileType>,
        selected_pathway_ids: &BTreeSet<String>,
        selected_cluster_ids: &BTreeSet<String>,
    ) -> Vec<&AssessmentQuestion> {
        select_visible_questions(
            &self.questions,
            detected_profile,
            selected_pathway_ids,
            selected_cluster_ids,
        )
    }
}
