use super::parameter::ParameterDomain;
use super::stage::{StageParameters, StageSpec, SubExecutionSlot};
use crate::algorithms::AlgorithmCatalogue;
use crate::error::{Result, SearchError};
use crate::types::{BacktestPeriod, StageKind};
use std::collections::HashMap;

/// Named graph of stages in declaration order.
///
/// Stages live in one arena; sub-execution slots refer to earlier stages by
/// index, so every reference points backwards and the graph is acyclic.
/// Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationSpace {
    stages: Vec<StageSpec>,
    index: HashMap<String, usize>,
    period: BacktestPeriod,
}

impl ConfigurationSpace {
    pub fn builder<'a>(
        catalogue: &'a dyn AlgorithmCatalogue,
        period: BacktestPeriod,
    ) -> ConfigurationSpaceBuilder<'a> {
        ConfigurationSpaceBuilder {
            catalogue,
            period,
            stages: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// A space with no stages. Enumerates to exactly one trivial configuration.
    pub fn empty(period: BacktestPeriod) -> Self {
        Self {
            stages: Vec::new(),
            index: HashMap::new(),
            period,
        }
    }

    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    pub fn stage(&self, index: usize) -> Option<&StageSpec> {
        self.stages.get(index)
    }

    pub fn stage_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn stage_by_name(&self, name: &str) -> Option<&StageSpec> {
        self.stage_index(name).map(|i| &self.stages[i])
    }

    pub fn period(&self) -> BacktestPeriod {
        self.period
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|s| s.name())
    }
}

pub struct ConfigurationSpaceBuilder<'a> {
    catalogue: &'a dyn AlgorithmCatalogue,
    period: BacktestPeriod,
    stages: Vec<StageSpec>,
    index: HashMap<String, usize>,
}

impl<'a> ConfigurationSpaceBuilder<'a> {
    /// Declare a stock-level stage
    pub fn add_stock(
        self,
        name: impl Into<String>,
        algorithm: &str,
        parameters: StageParameters,
    ) -> Result<Self> {
        self.add_stage(name.into(), algorithm, StageKind::Stock, parameters)
    }

    /// Declare an end-of-day decision stage
    pub fn add_eod(
        self,
        name: impl Into<String>,
        algorithm: &str,
        parameters: StageParameters,
    ) -> Result<Self> {
        self.add_stage(name.into(), algorithm, StageKind::Eod, parameters)
    }

    fn add_stage(
        mut self,
        name: String,
        algorithm: &str,
        kind: StageKind,
        parameters: StageParameters,
    ) -> Result<Self> {
        if self.index.contains_key(&name) {
            return Err(SearchError::Structural(format!(
                "stage '{}' already registered",
                name
            )));
        }

        let descriptor = self.catalogue.resolve(algorithm).ok_or_else(|| {
            SearchError::Structural(format!(
                "stage '{}': unknown algorithm '{}'",
                name, algorithm
            ))
        })?;
        if descriptor.kind != kind {
            return Err(SearchError::Structural(format!(
                "stage '{}': algorithm '{}' is {:?}-level, declared as {:?}",
                name, algorithm, descriptor.kind, kind
            )));
        }

        let mut plain = Vec::new();
        let mut slots = Vec::new();
        for p in parameters.into_descriptors() {
            match p.domain() {
                ParameterDomain::SubExecution { candidates } => {
                    let targets = self.resolve_candidates(&name, candidates)?;
                    slots.push(SubExecutionSlot::new(p, targets));
                }
                _ => plain.push(p),
            }
        }

        if slots.len() < descriptor.min_sub_executions {
            return Err(SearchError::Structural(format!(
                "stage '{}': algorithm '{}' requires at least {} sub-execution(s), got {}",
                name,
                algorithm,
                descriptor.min_sub_executions,
                slots.len()
            )));
        }

        let stage = StageSpec::new(name.clone(), descriptor.name, kind, plain, slots)?;
        log::debug!(
            "Registered {:?} stage '{}' ({} genes)",
            kind,
            name,
            stage.gene_count()
        );
        self.index.insert(name, self.stages.len());
        self.stages.push(stage);
        Ok(self)
    }

    fn resolve_candidates(&self, stage: &str, candidates: &[String]) -> Result<Vec<usize>> {
        candidates
            .iter()
            .map(|candidate| {
                let idx = self.index.get(candidate).copied().ok_or_else(|| {
                    SearchError::Structural(format!(
                        "stage '{}': sub-execution '{}' is not a previously declared stage",
                        stage, candidate
                    ))
                })?;
                if self.stages[idx].kind() != StageKind::Stock {
                    return Err(SearchError::Structural(format!(
                        "stage '{}': sub-execution '{}' is not a stock stage",
                        stage, candidate
                    )));
                }
                Ok(idx)
            })
            .collect()
    }

    pub fn build(self) -> Result<ConfigurationSpace> {
        if !self.stages.iter().any(|s| s.kind() == StageKind::Eod) {
            return Err(SearchError::Structural(
                "configuration space has no decision (eod) stage".to_string(),
            ));
        }
        Ok(ConfigurationSpace {
            stages: self.stages,
            index: self.index,
            period: self.period,
        })
    }
}
