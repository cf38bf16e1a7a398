use crate::config::{ConfigSection, GridSearchConfig};
use crate::engines::evaluation::{EvaluationPool, Evaluator};
use crate::engines::generation::{
    evolution_engine::{CancellationHandle, SearchOutcome},
    grid::GridEnumerator,
    progress::{GenerationReport, ProgressCallback},
    selector::StrategySelector,
};
use crate::engines::metrics::{CandidateComparator, CostFunction};
use crate::engines::space::ConfigurationSpace;
use crate::error::{Result, SearchError};

use std::sync::Arc;

/// Exhaustive search: every grid configuration is evaluated once
pub struct GridSearch {
    config: GridSearchConfig,
    enumerator: GridEnumerator,
    evaluator: Arc<dyn Evaluator>,
    cost_function: Arc<dyn CostFunction>,
    selector: Arc<StrategySelector>,
    pool: EvaluationPool,
    cancellation: CancellationHandle,
}

impl GridSearch {
    pub fn new(
        config: GridSearchConfig,
        space: Arc<ConfigurationSpace>,
        evaluator: Arc<dyn Evaluator>,
        cost_function: Arc<dyn CostFunction>,
        comparator: Arc<dyn CandidateComparator>,
    ) -> Result<Self> {
        config.validate()?;
        let mut enumerator = GridEnumerator::new(space)?;
        enumerator.seek(config.start_index)?;
        log::info!(
            "Grid search over {} configurations, starting at {}",
            enumerator.size(),
            config.start_index
        );

        Ok(Self {
            selector: Arc::new(StrategySelector::new(config.selector_capacity, comparator)?),
            pool: EvaluationPool::new(config.thread_amount)?,
            config,
            enumerator,
            evaluator,
            cost_function,
            cancellation: CancellationHandle::new(),
        })
    }

    pub fn cancellation_handle(&self) -> CancellationHandle {
        self.cancellation.clone()
    }

    pub fn selector(&self) -> &Arc<StrategySelector> {
        &self.selector
    }

    pub fn size(&self) -> u64 {
        self.enumerator.size()
    }

    /// Grid index to pass as `start_index` to resume after cancellation
    pub fn position(&self) -> u64 {
        self.enumerator.position()
    }

    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<SearchOutcome> {
        let mut batch_index = 0;
        let mut evaluations = 0;
        let mut evaluation_failures = 0;
        let mut successes = 0;
        let mut cancelled = false;

        while !self.enumerator.is_finished() {
            if self.cancellation.is_cancelled() {
                log::info!("Grid search cancelled at index {}", self.enumerator.position());
                cancelled = true;
                break;
            }

            callback.on_generation_start(batch_index);
            let configurations: Vec<_> = self
                .enumerator
                .by_ref()
                .take(self.config.batch_size)
                .collect();
            let batch = self.pool.evaluate_all(
                configurations,
                self.evaluator.as_ref(),
                self.cost_function.as_ref(),
                &self.selector,
            );

            evaluations += batch.scored.len() + batch.failures;
            evaluation_failures += batch.failures;
            successes += batch.scored.len();

            callback.on_generation_complete(&GenerationReport {
                generation: batch_index,
                evaluated: batch.scored.len(),
                failed: batch.failures,
                generation_best: batch.scored.iter().map(|c| c.cost).reduce(f64::max),
                overall_best: self.selector.best().map(|c| c.cost),
                selector_size: self.selector.len(),
            });
            batch_index += 1;
        }

        if !cancelled && successes == 0 && evaluations > 0 {
            return Err(SearchError::ExhaustedPopulation {
                generation: batch_index.saturating_sub(1),
            });
        }

        Ok(SearchOutcome {
            strategies: self.selector.snapshot(),
            generations: batch_index,
            evaluations,
            evaluation_failures,
            cancelled,
        })
    }
}
