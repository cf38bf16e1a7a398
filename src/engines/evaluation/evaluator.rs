use crate::engines::generation::genome::Configuration;
use crate::engines::generation::selector::ScoredCandidate;
use crate::engines::metrics::CostFunction;
use crate::error::{self, EvaluationError};
use crate::types::Metrics;

/// Backtest oracle: turns one configuration into metrics.
///
/// Called concurrently from pool workers. Implementations that need bounded
/// latency must enforce their own timeouts.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, configuration: &Configuration) -> Result<Metrics, EvaluationError>;
}

impl<F> Evaluator for F
where
    F: Fn(&Configuration) -> Result<Metrics, EvaluationError> + Send + Sync,
{
    fn evaluate(&self, configuration: &Configuration) -> Result<Metrics, EvaluationError> {
        self(configuration)
    }
}

/// Evaluate one configuration and attach its cost
pub fn score(
    configuration: Configuration,
    evaluator: &dyn Evaluator,
    cost_function: &dyn CostFunction,
) -> error::Result<ScoredCandidate> {
    let metrics = evaluator.evaluate(&configuration)?;
    let cost = cost_function.cost(&metrics);
    Ok(ScoredCandidate::new(configuration, metrics, cost))
}
