use thiserror::Error;

/// Failure reported by an evaluator for one configuration.
///
/// Kept separate from [`SearchError`] so evaluator implementations only need
/// this one type.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Evaluation failed: {reason}")]
pub struct EvaluationError {
    pub reason: String,
}

impl EvaluationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Enumeration overflow: grid of {stages} stages is too large to enumerate")]
    EnumerationOverflow { stages: usize },

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("Search exhausted without successful evaluation (generation {generation})")]
    ExhaustedPopulation { generation: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
