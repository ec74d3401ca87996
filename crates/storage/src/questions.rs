//! Question-set sources.
//!
//! A question file is a JSON array of `{ "question", "options", "correct" }`
//! records. The whole set is rejected if any record fails validation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::{Question, QuestionError, QuizSet};
use serde::Deserialize;
use thiserror::Error;

/// Question set bundled with the application.
pub const DEFAULT_QUESTIONS_JSON: &str = include_str!("../assets/questions.json");

/// Why a question set could not be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed question set: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("question {index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Wire shape of a single question record.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
}

impl QuestionRecord {
    /// # Errors
    ///
    /// Returns `QuestionError` if the record does not describe a valid question.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(self.question, self.options, self.correct)
    }
}

/// Parse a JSON question set.
///
/// # Errors
///
/// Returns `LoadError::Malformed` for invalid JSON or record shapes and
/// `LoadError::InvalidQuestion` for records that fail validation.
pub fn parse_quiz_set(json: &str) -> Result<QuizSet, LoadError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(json)?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            record
                .into_question()
                .map_err(|source| LoadError::InvalidQuestion { index, source })
        })
        .collect()
}

/// Anything that can produce the question set for a session.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// # Errors
    ///
    /// Returns `LoadError` if the source is unreachable or malformed.
    async fn load(&self) -> Result<QuizSet, LoadError>;
}

/// Reads a question set from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileQuestionSource {
    path: PathBuf,
}

impl JsonFileQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for JsonFileQuestionSource {
    async fn load(&self) -> Result<QuizSet, LoadError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let set = parse_quiz_set(&raw)?;
        tracing::debug!(path = %self.path.display(), questions = set.len(), "question set loaded");
        Ok(set)
    }
}

/// Serves a fixed question set, either built in code or from a JSON string.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionSource {
    questions: QuizSet,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new(questions: QuizSet) -> Self {
        Self { questions }
    }

    /// The question set shipped with the application.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the bundled JSON is invalid.
    pub fn bundled() -> Result<Self, LoadError> {
        parse_quiz_set(DEFAULT_QUESTIONS_JSON).map(Self::new)
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn load(&self) -> Result<QuizSet, LoadError> {
        Ok(self.questions.clone())
    }
}
