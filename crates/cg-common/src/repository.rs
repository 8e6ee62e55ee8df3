use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assessment::{AssessmentQuestion, QuestionBank, QuestionBankError, SelectionCatalog},
    personality::{AnswerWeight, AnswerWeightTable, WeightTableError},
    CareerRecord, CatalogEntry,
};

pub const CAREERS_FILE: &str = "careers.json";
pub const QUESTIONS_FILE: &str = "questions.json";
pub const ANSWER_WEIGHTS_FILE: &str = "answer_weights.json";
pub const PATHWAYS_FILE: &str = "pathways.json";
pub const CLUSTERS_FILE: &str = "clusters.json";

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
    #[error(transparent)]
    WeightTable(#[from] WeightTableError),
}

/// Reference data consumed by the scoring core.
///
/// Everything is fetched per call; implementations decide whether to cache.
pub trait CareerDataSource: Send + Sync {
    /// Short name for logs ("memory", "json_dir").
    fn name(&self) -> &'static str;

    fn fetch_career_pool(&self) -> Result<Vec<CareerRecord>, DataSourceError>;

    fn fetch_question_bank(&self) -> Result<QuestionBank, DataSourceError>;

    fn fetch_answer_weights(&self) -> Result<AnswerWeightTable, DataSourceError>;

    fn fetch_pathways(&self) -> Result<Vec<CatalogEntry>, DataSourceError> {
        Ok(Vec::new())
    }

    fn fetch_clusters(&self) -> Result<Vec<CatalogEntry>, DataSourceError> {
        Ok(Vec::new())
    }

    fn fetch_selection_catalog(&self) -> Result<SelectionCatalog, DataSourceError> {
        Ok(SelectionCatalog::new(
            self.fetch_pathways()?,
            self.fetch_clusters()?,
        ))
    }
}

/// Data held in memory, validated on each fetch like any other source.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    pub careers: Vec<CareerRecord>,
    pub questions: Vec<AssessmentQuestion>,
    pub answer_weights: Vec<AnswerWeight>,
    pub pathways: Vec<CatalogEntry>,
    pub clusters: Vec<CatalogEntry>,
}

impl CareerDataSource for InMemoryDataSource {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch_career_pool(&self) -> Result<Vec<CareerRecord>, DataSourceError> {
        Ok(self.careers.clone())
    }

    fn fetch_question_bank(&self) -> Result<QuestionBank, DataSourceError> {
        Ok(QuestionBank::new(self.questions.clone())?)
    }

    fn fetch_answer_weights(&self) -> Result<AnswerWeightTable, DataSourceError> {
        Ok(AnswerWeightTable::from_rows(self.answer_weights.clone())?)
    }

    fn fetch_pathways(&self) -> Result<Vec<CatalogEntry>, DataSourceError> {
        Ok(self.pathways.clone())
    }

    fn fetch_clusters(&self) -> Result<Vec<CatalogEntry>, DataSourceError> {
        Ok(self.clusters.clone())
    }
}

/// JSON files in one directory. `pathways.json` and `clusters.json` are optional.
#[derive(Debug, Clone)]
pub struct JsonDirDataSource {
    dir: PathBuf,
}

impl JsonDirDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_json<T: DeserializeOwned>(&self, file: &str) -> Result<T, DataSourceError> {
        let path = self.dir.join(file);
        let raw = fs::read_to_string(&path).map_err(|source| DataSourceError::Io {
            path: path.clone(),
            source,
        })?;
        let parsed = serde_json::from_str(&raw)
            .map_err(|source| DataSourceError::Parse { path: path.clone(), source })?;
        debug!(path = %path.display(), bytes = raw.len(), "loaded data file");
        Ok(parsed)
    }

    fn read_optional_json<T: DeserializeOwned + Default>(
        &self,
        file: &str,
    ) -> Result<T, DataSourceError> {
        if !self.dir.join(file).exists() {
            debug!(dir = %self.dir.display(), file, "optional data file missing");
            return Ok(T::default());
        }
        self.read_json(file)
    }
}

impl CareerDataSource for JsonDirDataSource {
    fn name(&self) -> &'static str {
        "json_dir"
    }

    fn fetch_career_pool(&self) -> Result<Vec<CareerRecord>, DataSourceError> {
        let careers: Vec<CareerRecord> = self.read_json(CAREERS_FILE)?;
        info!(source = self.name(), careers = careers.len(), "fetched career pool");
        Ok(careers)
    }

    fn fetch_question_bank(&self) -> Result<QuestionBank, DataSourceError> {
        let questions: Vec<AssessmentQuestion> = self.read_json(QUESTIONS_FILE)?;
        Ok(QuestionBank::new(questions)?)
    }

    fn fetch_answer_weights(&self) -> Result<AnswerWeightTable, DataSourceError> {
        let rows: Vec<AnswerWeight> = self.read_json(ANSWER_WEIGHTS_FILE)?;
        Ok(AnswerWeightTable::from_rows(rows)?)
    }

    fn fetch_pathways(&self) -> Result<Vec<CatalogEntry>, DataSourceError> {
        self.read_optional_json(PATHWAYS_FILE)
    }

    fn fetch_clusters(&self) -> Result<Vec<CatalogEntry>, DataSourceError> {
        self.read_optional_json(CLUSTERS_FILE)
    }
}
