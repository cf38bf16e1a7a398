use super::genome::{Configuration, StageGenes};
use crate::engines::space::ConfigurationSpace;
use crate::error::{Result, SearchError};
use rand::Rng;
use std::sync::Arc;

pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.1;

/// Random draw, crossover and mutation over one configuration space
pub struct GeneticOperators {
    space: Arc<ConfigurationSpace>,
    mutation_probability: f64,
}

impl GeneticOperators {
    pub fn new(space: Arc<ConfigurationSpace>, mutation_probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&mutation_probability) {
            return Err(SearchError::Configuration(format!(
                "mutation probability must be within [0, 1], got {}",
                mutation_probability
            )));
        }
        Ok(Self {
            space,
            mutation_probability,
        })
    }

    pub fn space(&self) -> &Arc<ConfigurationSpace> {
        &self.space
    }

    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    /// Uniform, independent draw for every gene
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Configuration {
        let genes = self
            .space
            .stages()
            .iter()
            .map(|stage| StageGenes {
                parameters: stage
                    .parameters()
                    .iter()
                    .map(|p| rng.gen_range(0..p.count()))
                    .collect(),
                sub_executions: stage
                    .sub_executions()
                    .iter()
                    .map(|s| rng.gen_range(0..s.targets().len()))
                    .collect(),
            })
            .collect();
        Configuration::from_genes(Arc::clone(&self.space), genes)
    }

    /// Uniform per-gene crossover that keeps every sub-execution together with
    /// the subtree it selects.
    ///
    /// Stages are visited consumers-first (reverse declaration order). A stage
    /// already claimed by an earlier reference copies all of its genes from
    /// the claiming parent. A free stage flips a coin per parameter, and per
    /// slot picks a parent whose selected subtree does not clash with claims
    /// made so far, then claims that subtree for the same parent. Should both
    /// parents clash, the child is a copy of one parent.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        a: &Configuration,
        b: &Configuration,
        rng: &mut R,
    ) -> Result<Configuration> {
        self.check_space(a)?;
        self.check_space(b)?;

        let stage_count = self.space.len();
        let mut assigned: Vec<Option<StageGenes>> = vec![None; stage_count];

        for stage in (0..stage_count).rev() {
            if assigned[stage].is_some() {
                continue;
            }

            let parameters = a.genes()[stage]
                .parameters
                .iter()
                .zip(&b.genes()[stage].parameters)
                .map(|(&ga, &gb)| if rng.gen_bool(0.5) { ga } else { gb })
                .collect();

            let slot_count = a.genes()[stage].sub_executions.len();
            let mut sub_executions = Vec::with_capacity(slot_count);
            for slot in 0..slot_count {
                let parents = if rng.gen_bool(0.5) { [a, b] } else { [b, a] };
                let claim = parents.into_iter().find_map(|parent| {
                    let target = parent.sub_execution_target(stage, slot)?;
                    let subtree = parent.subtree(target);
                    let compatible = subtree.iter().all(|&u| match &assigned[u] {
                        Some(genes) => *genes == parent.genes()[u],
                        None => true,
                    });
                    compatible.then_some((parent, subtree))
                });

                let Some((parent, subtree)) = claim else {
                    log::trace!("Crossover clash at stage {}, copying a parent", stage);
                    let parent = if rng.gen_bool(0.5) { a } else { b };
                    return Ok(parent.clone());
                };

                sub_executions.push(parent.genes()[stage].sub_executions[slot]);
                for u in subtree {
                    assigned[u] = Some(parent.genes()[u].clone());
                }
            }

            assigned[stage] = Some(StageGenes {
                parameters,
                sub_executions,
            });
        }

        let genes = assigned.into_iter().map(Option::unwrap_or_default).collect();
        Ok(Configuration::from_genes(Arc::clone(&self.space), genes))
    }

    /// Redraw each gene with the mutation probability. A redraw may land on
    /// the current value. Stages and candidate sets never change.
    pub fn mutate<R: Rng + ?Sized>(
        &self,
        configuration: &Configuration,
        rng: &mut R,
    ) -> Result<Configuration> {
        self.check_space(configuration)?;

        let genes = self
            .space
            .stages()
            .iter()
            .zip(configuration.genes())
            .map(|(stage, current)| StageGenes {
                parameters: stage
                    .parameters()
                    .iter()
                    .zip(&current.parameters)
                    .map(|(p, &gene)| {
                        if rng.gen_bool(self.mutation_probability) {
                            rng.gen_range(0..p.count())
                        } else {
                            gene
                        }
                    })
                    .collect(),
                sub_executions: stage
                    .sub_executions()
                    .iter()
                    .zip(&current.sub_executions)
                    .map(|(slot, &gene)| {
                        if rng.gen_bool(self.mutation_probability) {
                            rng.gen_range(0..slot.targets().len())
                        } else {
                            gene
                        }
                    })
                    .collect(),
            })
            .collect();
        Ok(Configuration::from_genes(Arc::clone(&self.space), genes))
    }

    fn check_space(&self, configuration: &Configuration) -> Result<()> {
        let space = configuration.space();
        if Arc::ptr_eq(space, &self.space) || **space == *self.space {
            Ok(())
        } else {
            Err(SearchError::Structural(
                "configuration belongs to a different configuration space".to_string(),
            ))
        }
    }
}
