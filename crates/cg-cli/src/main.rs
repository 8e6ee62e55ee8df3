mod classifier;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use cg_common::{
    assessment::ResponseError,
    config::{load_config_from_env, ConfigError, CoreConfig},
    logging::{init_tracing_subscriber, install_tracing_panic_hook},
    matching::{CareerRanker, SimilarityTarget},
    personality::PersonalityAnalyzer,
    AssessmentQuestion, AssessmentSession, CareerDataSource, DataSourceError, DimensionScores,
    JsonDirDataSource, QuestionResponse, ScoredCareer,
};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::classifier::KeywordProfileClassifier;

const APP_NAME: &str = "cg";

#[derive(Debug, Parser)]
#[command(name = "cg", about = "Career guidance scoring: similar careers, personality types, question flow")]
struct Cli {
    /// Directory holding careers.json, questions.json and answer_weights.json
    #[arg(long, env = "CG_DATA_DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank careers similar to a target career
    Similar {
        /// Target skill (repeat for several)
        #[arg(long = "skill", required = true)]
        skills: Vec<String>,
        /// Target job title
        #[arg(long)]
        title: String,
        /// Target industry
        #[arg(long)]
        industry: Option<String>,
    },
    /// Score a `{questionId: answer}` JSON object into personality types
    Personality {
        #[arg(long)]
        responses: PathBuf,
    },
    /// Replay a JSON array of responses and print the visible questions
    Flow {
        #[arg(long)]
        responses: PathBuf,
        /// Reuse an existing session id instead of generating one
        #[arg(long)]
        session_id: Option<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error("failed to read {path}: {source}")]
    Read {
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
    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct PersonalityReport {
    scores: DimensionScores,
    types: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FlowReport<'a> {
    session: &'a AssessmentSession,
    visible_question_ids: Vec<&'a str>,
    next_question: Option<&'a AssessmentQuestion>,
    personality: PersonalityReport,
}

fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn similar(
    source: &dyn CareerDataSource,
    config: &CoreConfig,
    skills: &[String],
    title: &str,
    industry: Option<&str>,
) -> Result<Vec<ScoredCareer>, CliError> {
    let pool = source.fetch_career_pool()?;
    let target = SimilarityTarget {
        skills,
        title,
        industry,
    };
    let ranked = CareerRanker::new(config.similarity.clone()).rank(&pool, &target);
    info!(
        source = source.name(),
        pool = pool.len(),
        results = ranked.len(),
        "ranked similar careers"
    );
    Ok(ranked)
}

fn personality(
    source: &dyn CareerDataSource,
    config: &CoreConfig,
    answers: &BTreeMap<String, String>,
) -> Result<PersonalityReport, CliError> {
    let weights = source.fetch_answer_weights()?;
    let analyzer = PersonalityAnalyzer::new(config.personality.clone());
    let scores = analyzer.score(answers, &weights);
    let types = analyzer.derive_types(&scores);
    info!(
        answers = answers.len(),
        primary = types.first().map(String::as_str).unwrap_or(""),
        confidence = scores.confidence_level,
        "scored personality"
    );
    Ok(PersonalityReport { scores, types })
}

fn run() -> Result<(), CliError> {
    dotenv().ok();
    init_tracing_subscriber(APP_NAME);
    install_tracing_panic_hook(APP_NAME);

    let cli = Cli::parse();
    let config = load_config_from_env()?;
    let source = JsonDirDataSource::new(&cli.data_dir);

    match cli.command {
        Command::Similar {
            skills,
            title,
            industry,
        } => {
            let ranked = similar(&source, &config, &skills, &title, industry.as_deref())?;
            print_json(&ranked)
        }
        Command::Personality { responses } => {
            let answers: BTreeMap<String, String> = read_json_file(&responses)?;
            print_json(&personality(&source, &config, &answers)?)
        }
        Command::Flow {
            responses,
            session_id,
        } => {
            let responses: Vec<QuestionResponse> = read_json_file(&responses)?;
            let bank = source.fetch_question_bank()?;
            let catalog = source.fetch_selection_catalog()?;

            let mut session = match session_id {
                Some(id) => AssessmentSession::with_id(id),
                None => AssessmentSession::new(),
            };
            for response in responses {
                session.record_response(&bank, &catalog, &KeywordProfileClassifier, response)?;
            }

            let visible = session.visible_questions(&bank);
            let report = FlowReport {
                session: &session,
                visible_question_ids: visible.iter().map(|q| q.id.as_str()).collect(),
                next_question: session.next_question(&bank),
                personality: personality(&source, &config, &session.answers_for_scoring())?,
            };
            print_json(&report)
        }
    }
}

fn main() {
    if let Err(err) = run() {
        tracing::error!(error = %err, "cg failed");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_common::{AnswerWeight, CareerRecord, Dimension, InMemoryDataSource};

    fn career(id: &str, title: &str, skills: &[&str]) -> CareerRecord {
        CareerRecord {
            id: id.into(),
            title: title.into(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            ..CareerRecord::default()
        }
    }

    #[test]
    fn cli_parses_repeated_skills() {
        let cli = Cli::parse_from([
            "cg",
            "--data-dir",
            "fixtures",
            "similar",
            "--skill",
            "JavaScript",
            "--skill",
            "React",
            "--title",
            "Frontend Developer",
        ]);
        assert_eq!(cli.data_dir, PathBuf::from("fixtures"));
        match cli.command {
            Command::Similar {
                skills, industry, ..
            } => {
                assert_eq!(skills, vec!["JavaScript", "React"]);
                assert!(industry.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn similar_ranks_from_the_data_source() {
        let source = InMemoryDataSource {
            careers: vec![
                career("c1", "Software Engineer", &["JavaScript", "React", "Node.js"]),
                career("c2", "Nurse", &["Patient care", "Medication"]),
            ],
            ..InMemoryDataSource::default()
        };
        let skills = vec!["JavaScript".to_string(), "React".to_string()];

        let ranked = similar(
            &source,
            &CoreConfig::default(),
            &skills,
            "Frontend Developer",
            None,
        )
        .expect("ranked");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].career.id, "c1");
    }

    #[test]
    fn personality_reports_scores_and_types() {
        let source = InMemoryDataSource {
            answer_weights: vec![AnswerWeight {
                question_id: "q1".into(),
                answer_value: "Reading".into(),
                dimension: Dimension::I,
                weight: 2.0,
            }],
            ..InMemoryDataSource::default()
        };
        let answers = BTreeMap::from([("q1".to_string(), "Reading".to_string())]);

        let report = personality(&source, &CoreConfig::default(), &answers).expect("report");
        assert_eq!(report.scores.e_i_score, -2.0);
        assert_eq!(report.types[0], "ISTJ");
    }

    #[test]
    fn read_json_file_reports_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("responses.json");
        fs::write(&path, "[").expect("write");

        let err = read_json_file::<Vec<QuestionResponse>>(&path).expect_err("bad json");
        assert!(matches!(err, CliError::Parse { .. }));
        assert!(err.to_string().contains("responses.json"));
    }
}
