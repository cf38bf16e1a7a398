use crate::config::{ConfigSection, GeneticSearchConfig};
use crate::engines::evaluation::{EvaluationPool, Evaluator};
use crate::engines::generation::{
    genome::Configuration,
    operators::GeneticOperators,
    progress::{GenerationReport, ProgressCallback},
    selector::{rank_candidates, ScoredCandidate, StrategySelector},
};
use crate::engines::metrics::{CandidateComparator, CostFunction};
use crate::engines::space::ConfigurationSpace;
use crate::error::{Result, SearchError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Redraws allowed for a child that duplicates one already in the next generation
const MAX_DUPLICATE_REDRAWS: usize = 8;

/// Cooperative cancellation, checked between generations
#[derive(Debug, Clone, Default)]
pub struct CancellationHandle(Arc<AtomicBool>);

impl CancellationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Seeding,
    Evaluating,
    Selecting,
    Recombining,
    Done,
}

/// What a finished (or cancelled) search produced
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Selector snapshot, best-first
    pub strategies: Vec<ScoredCandidate>,
    /// Generations (grid: batches) fully evaluated
    pub generations: usize,
    pub evaluations: usize,
    pub evaluation_failures: usize,
    pub cancelled: bool,
}

/// Generation loop of the genetic search
pub struct GeneticSearchOrchestrator {
    config: GeneticSearchConfig,
    operators: GeneticOperators,
    evaluator: Arc<dyn Evaluator>,
    cost_function: Arc<dyn CostFunction>,
    selector: Arc<StrategySelector>,
    pool: EvaluationPool,
    rng: StdRng,
    cancellation: CancellationHandle,
    state: SearchState,
}

impl GeneticSearchOrchestrator {
    pub fn new(
        config: GeneticSearchConfig,
        space: Arc<ConfigurationSpace>,
        evaluator: Arc<dyn Evaluator>,
        cost_function: Arc<dyn CostFunction>,
        comparator: Arc<dyn CandidateComparator>,
    ) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            operators: GeneticOperators::new(space, config.mutation_probability)?,
            selector: Arc::new(StrategySelector::new(config.population_size, comparator)?),
            pool: EvaluationPool::new(config.thread_amount)?,
            config,
            evaluator,
            cost_function,
            rng,
            cancellation: CancellationHandle::new(),
            state: SearchState::Seeding,
        })
    }

    pub fn cancellation_handle(&self) -> CancellationHandle {
        self.cancellation.clone()
    }

    /// All-time best candidates; keeps accumulating across runs
    pub fn selector(&self) -> &Arc<StrategySelector> {
        &self.selector
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn config(&self) -> &GeneticSearchConfig {
        &self.config
    }

    /// Run generations until `max_populations_amount` have been evaluated or
    /// the search is cancelled
    pub fn run<C: ProgressCallback>(&mut self, mut callback: C) -> Result<SearchOutcome> {
        let mut population: Vec<Configuration> = Vec::new();
        let mut evaluated: Vec<ScoredCandidate> = Vec::new();
        let mut breeding_stock: Vec<ScoredCandidate> = Vec::new();

        let mut generation = 0;
        let mut evaluations = 0;
        let mut evaluation_failures = 0;
        let mut cancelled = false;

        self.state = SearchState::Seeding;
        loop {
            match self.state {
                SearchState::Seeding => {
                    population = (0..self.config.population_size)
                        .map(|_| self.operators.random(&mut self.rng))
                        .collect();
                    self.transition(SearchState::Evaluating);
                }
                SearchState::Evaluating => {
                    if self.cancellation.is_cancelled() {
                        log::info!("Search cancelled before generation {}", generation + 1);
                        cancelled = true;
                        self.transition(SearchState::Done);
                        continue;
                    }

                    callback.on_generation_start(generation);
                    let batch = self.pool.evaluate_all(
                        std::mem::take(&mut population),
                        self.evaluator.as_ref(),
                        self.cost_function.as_ref(),
                        &self.selector,
                    );
                    evaluations += batch.scored.len() + batch.failures;
                    evaluation_failures += batch.failures;

                    if batch.scored.is_empty() {
                        log::error!(
                            "Every candidate of generation {} failed evaluation",
                            generation + 1
                        );
                        self.transition(SearchState::Done);
                        return Err(SearchError::ExhaustedPopulation { generation });
                    }

                    evaluated = batch.scored;
                    let report = GenerationReport {
                        generation,
                        evaluated: evaluated.len(),
                        failed: batch.failures,
                        generation_best: evaluated.iter().map(|c| c.cost).reduce(f64::max),
                        overall_best: self.selector.best().map(|c| c.cost),
                        selector_size: self.selector.len(),
                    };
                    callback.on_generation_complete(&report);

                    generation += 1;
                    if generation >= self.config.max_populations_amount {
                        self.transition(SearchState::Done);
                    } else {
                        self.transition(SearchState::Selecting);
                    }
                }
                SearchState::Selecting => {
                    breeding_stock = self.select_breeding_stock(std::mem::take(&mut evaluated));
                    self.transition(SearchState::Recombining);
                }
                SearchState::Recombining => {
                    population = self.recombine(&breeding_stock, generation)?;
                    self.transition(SearchState::Evaluating);
                }
                SearchState::Done => break,
            }
        }

        Ok(SearchOutcome {
            strategies: self.selector.snapshot(),
            generations: generation,
            evaluations,
            evaluation_failures,
            cancelled,
        })
    }

    fn transition(&mut self, next: SearchState) {
        log::debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Best `breeding_stock_size()` of this generation only
    fn select_breeding_stock(&self, mut evaluated: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        let comparator = self.selector.comparator().as_ref();
        evaluated.sort_by(|a, b| rank_candidates(a, b, comparator));
        evaluated.truncate(self.config.breeding_stock_size());
        evaluated
    }

    /// Crossover children, then mutants, then fresh random draws for any
    /// shortfall left by duplicate children
    fn recombine(
        &mut self,
        breeding_stock: &[ScoredCandidate],
        generation: usize,
    ) -> Result<Vec<Configuration>> {
        let population_size = self.config.population_size;
        let crossover_amount = self.config.crossover_amount();
        let mut next = Vec::with_capacity(population_size);
        let mut hash_codes = HashSet::with_capacity(population_size);

        for _ in 0..crossover_amount {
            for _ in 0..MAX_DUPLICATE_REDRAWS {
                let a = Self::pick(breeding_stock, generation, &mut self.rng)?;
                let b = Self::pick(breeding_stock, generation, &mut self.rng)?;
                let child = self.operators.crossover(a, b, &mut self.rng)?;
                if hash_codes.insert(child.hash_code().to_string()) {
                    next.push(child);
                    break;
                }
            }
        }

        for _ in crossover_amount..population_size {
            for _ in 0..MAX_DUPLICATE_REDRAWS {
                let parent = Self::pick(breeding_stock, generation, &mut self.rng)?;
                let child = self.operators.mutate(parent, &mut self.rng)?;
                if hash_codes.insert(child.hash_code().to_string()) {
                    next.push(child);
                    break;
                }
            }
        }

        let shortfall = population_size - next.len();
        if shortfall > 0 {
            log::debug!("Filling {} duplicate slots with random draws", shortfall);
        }
        while next.len() < population_size {
            next.push(self.operators.random(&mut self.rng));
        }
        Ok(next)
    }

    fn pick<'a>(
        breeding_stock: &'a [ScoredCandidate],
        generation: usize,
        rng: &mut StdRng,
    ) -> Result<&'a Configuration> {
        breeding_stock
            .choose(rng)
            .map(|c| &c.configuration)
            .ok_or(SearchError::ExhaustedPopulation { generation })
    }
}
