use super::traits::{invalid, ConfigSection};
use crate::engines::generation::operators::DEFAULT_MUTATION_PROBABILITY;
use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Parameters of the genetic search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneticSearchConfig {
    /// Candidates per generation; also the selector capacity
    pub population_size: usize,
    /// Number of generations to evaluate
    pub max_populations_amount: usize,
    pub thread_amount: usize,
    /// Fraction of each generation kept as breeding stock, in (0, 1]
    pub best_part: f64,
    /// Fraction of the next generation produced by crossover, in [0, 1]
    pub crossover_part: f64,
    /// Per-gene redraw probability used by mutation
    pub mutation_probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneticSearchConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_populations_amount: 50,
            thread_amount: 4,
            best_part: 0.75,
            crossover_part: 0.7,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            seed: None,
        }
    }
}

impl GeneticSearchConfig {
    /// Size of the breeding stock retained from each generation (at least one)
    pub fn breeding_stock_size(&self) -> usize {
        ((self.best_part * self.population_size as f64).floor() as usize).max(1)
    }

    /// Number of children produced by crossover in each new generation
    pub fn crossover_amount(&self) -> usize {
        ((self.crossover_part * self.population_size as f64).floor() as usize)
            .min(self.population_size)
    }
}

impl ConfigSection for GeneticSearchConfig {
    fn section_name() -> &'static str {
        "genetic"
    }

    fn validate(&self) -> Result<(), SearchError> {
        let section = Self::section_name();
        if self.population_size == 0 {
            return Err(invalid(section, "population_size must be positive"));
        }
        if self.max_populations_amount == 0 {
            return Err(invalid(section, "max_populations_amount must be positive"));
        }
        if self.thread_amount == 0 {
            return Err(invalid(section, "thread_amount must be positive"));
        }
        if !(self.best_part > 0.0 && self.best_part <= 1.0) {
            return Err(invalid(section, "best_part must be within (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.crossover_part) {
            return Err(invalid(section, "crossover_part must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(invalid(section, "mutation_probability must be within [0, 1]"));
        }
        Ok(())
    }
}
