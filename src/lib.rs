//! Parameter-space search for multi-stage trading strategies.
//!
//! A [`ConfigurationSpace`] describes stock-level indicator stages feeding
//! end-of-day decision stages, each with tunable parameters. The space is
//! explored exhaustively by [`GridSearch`] or stochastically by
//! [`GeneticSearchOrchestrator`]; every candidate is scored by an external
//! [`Evaluator`] and the best survive in a [`StrategySelector`].

pub mod algorithms;
pub mod config;
pub mod engines;
pub mod error;
pub mod types;

pub use algorithms::{AlgorithmCatalogue, AlgorithmRegistry, StageDescriptor};
pub use engines::evaluation::Evaluator;
pub use engines::generation::{
    Configuration, GeneticOperators, GeneticSearchOrchestrator, GridEnumerator, GridSearch,
    ScoredCandidate, SearchOutcome, StrategySelector,
};
pub use engines::metrics::{CandidateComparator, CostFunction, WeightedSumCost};
pub use engines::space::{ConfigurationSpace, ParameterDescriptor, StageParameters};
pub use error::{EvaluationError, Result, SearchError};
pub use types::{BacktestPeriod, MetricType, Metrics, ParameterValue, StageKind};
