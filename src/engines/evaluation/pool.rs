use super::evaluator::{score, Evaluator};
use crate::engines::generation::genome::Configuration;
use crate::engines::generation::selector::{ScoredCandidate, StrategySelector};
use crate::engines::metrics::CostFunction;
use crate::error::{Result, SearchError};

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of evaluating one batch of configurations
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successful evaluations, in submission order
    pub scored: Vec<ScoredCandidate>,
    pub failures: usize,
}

/// Fixed-size worker pool shared by the grid and genetic searches
pub struct EvaluationPool {
    pool: rayon::ThreadPool,
    thread_amount: usize,
}

impl EvaluationPool {
    pub fn new(thread_amount: usize) -> Result<Self> {
        if thread_amount == 0 {
            return Err(SearchError::Configuration(
                "thread amount must be positive".to_string(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_amount)
            .thread_name(|i| format!("stratsearch-eval-{}", i))
            .build()
            .map_err(|e| {
                SearchError::Configuration(format!("failed to build worker pool: {}", e))
            })?;
        Ok(Self {
            pool,
            thread_amount,
        })
    }

    pub fn thread_amount(&self) -> usize {
        self.thread_amount
    }

    /// Evaluate every configuration, offering each success to `selector` from
    /// the worker that produced it. Returns once all evaluations finished.
    pub fn evaluate_all(
        &self,
        configurations: Vec<Configuration>,
        evaluator: &dyn Evaluator,
        cost_function: &dyn CostFunction,
        selector: &StrategySelector,
    ) -> BatchOutcome {
        let total = configurations.len();
        let completed = AtomicUsize::new(0);

        let results: Vec<Option<ScoredCandidate>> = self.pool.install(|| {
            configurations
                .into_par_iter()
                .map(|configuration| {
                    let hash_code = configuration.hash_code().to_string();
                    let outcome = match score(configuration, evaluator, cost_function) {
                        Ok(candidate) => {
                            let accepted = selector.insert(candidate.clone());
                            log::trace!(
                                "Evaluated {} cost={:.6} accepted={}",
                                hash_code,
                                candidate.cost,
                                accepted
                            );
                            Some(candidate)
                        }
                        Err(e) => {
                            log::warn!("Skipping {}: {}", hash_code, e);
                            None
                        }
                    };
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % 100 == 0 || done == total {
                        log::debug!("  Evaluated {}/{} configurations", done, total);
                    }
                    outcome
                })
                .collect()
        });

        let failures = results.iter().filter(|r| r.is_none()).count();
        BatchOutcome {
            scored: results.into_iter().flatten().collect(),
            failures,
        }
    }
}
