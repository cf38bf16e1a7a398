//! Concrete configurations ("chromosomes").
//!
//! A configuration stores one gene per parameter and per sub-execution slot of
//! every stage in its space. Genes are indices into the descriptor's
//! achievable values (or into the slot's candidate list), so any gene vector
//! whose digits stay within range is a valid configuration. Values and the
//! resolved dependency graph are decoded on demand.

use crate::engines::space::ConfigurationSpace;
use crate::types::{ParameterValue, StageKind};
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Genes of one stage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StageGenes {
    pub(crate) parameters: Vec<u64>,
    pub(crate) sub_executions: Vec<usize>,
}

impl StageGenes {
    /// Value index per parameter
    pub fn parameters(&self) -> &[u64] {
        &self.parameters
    }

    /// Chosen candidate position per sub-execution slot
    pub fn sub_executions(&self) -> &[usize] {
        &self.sub_executions
    }
}

/// Serialisable, name-keyed view of one configured stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSettings {
    pub name: String,
    pub algorithm: String,
    pub kind: StageKind,
    pub parameters: Vec<ParameterSetting>,
    pub sub_executions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSetting {
    pub name: String,
    pub value: ParameterValue,
}

#[derive(Clone)]
pub struct Configuration {
    space: Arc<ConfigurationSpace>,
    genes: Vec<StageGenes>,
    hash_code: String,
}

impl Configuration {
    /// Genes must be within range for `space`; every producer in this crate
    /// guarantees that.
    pub(crate) fn from_genes(space: Arc<ConfigurationSpace>, genes: Vec<StageGenes>) -> Self {
        debug_assert_eq!(genes.len(), space.len());
        let mut configuration = Self {
            space,
            genes,
            hash_code: String::new(),
        };
        configuration.hash_code = configuration.compute_hash_code();
        configuration
    }

    pub fn space(&self) -> &Arc<ConfigurationSpace> {
        &self.space
    }

    pub fn genes(&self) -> &[StageGenes] {
        &self.genes
    }

    /// Stable identity: hex SHA-256 of the canonical JSON settings
    pub fn hash_code(&self) -> &str {
        &self.hash_code
    }

    pub fn value(&self, stage: &str, parameter: &str) -> Option<ParameterValue> {
        let idx = self.space.stage_index(stage)?;
        let spec = &self.space.stages()[idx];
        let p = spec.parameter_index(parameter)?;
        spec.parameters()[p].value_at(self.genes[idx].parameters[p])
    }

    /// Name of the stage chosen for sub-execution `slot` of `stage`
    pub fn sub_execution(&self, stage: &str, slot: usize) -> Option<&str> {
        let idx = self.space.stage_index(stage)?;
        let target = self.sub_execution_target(idx, slot)?;
        Some(self.space.stages()[target].name())
    }

    /// Stage index chosen for sub-execution `slot` of stage `stage`
    pub fn sub_execution_target(&self, stage: usize, slot: usize) -> Option<usize> {
        let spec = self.space.stage(stage)?;
        let choice = *self.genes.get(stage)?.sub_executions.get(slot)?;
        spec.sub_executions().get(slot)?.target(choice)
    }

    /// Upstream stages feeding `stage`, in slot order
    pub fn upstream(&self, stage: usize) -> Vec<usize> {
        let slots = self
            .space
            .stage(stage)
            .map(|s| s.sub_executions().len())
            .unwrap_or(0);
        (0..slots)
            .filter_map(|slot| self.sub_execution_target(stage, slot))
            .collect()
    }

    /// `stage` plus every stage reachable through its chosen sub-executions
    pub fn subtree(&self, stage: usize) -> BTreeSet<usize> {
        let mut visited = BTreeSet::new();
        let mut pending = vec![stage];
        while let Some(current) = pending.pop() {
            if visited.insert(current) {
                pending.extend(self.upstream(current));
            }
        }
        visited
    }

    pub fn settings(&self) -> Vec<StageSettings> {
        self.space
            .stages()
            .iter()
            .enumerate()
            .map(|(idx, spec)| StageSettings {
                name: spec.name().to_string(),
                algorithm: spec.algorithm().to_string(),
                kind: spec.kind(),
                parameters: spec
                    .parameters()
                    .iter()
                    .zip(&self.genes[idx].parameters)
                    .filter_map(|(p, &gene)| {
                        p.value_at(gene).map(|value| ParameterSetting {
                            name: p.name().to_string(),
                            value,
                        })
                    })
                    .collect(),
                sub_executions: self
                    .upstream(idx)
                    .into_iter()
                    .map(|t| self.space.stages()[t].name().to_string())
                    .collect(),
            })
            .collect()
    }

    /// Pretty JSON of [`settings`](Self::settings)
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn compute_hash_code(&self) -> String {
        let canonical = serde_json::to_string(&self.settings()).unwrap_or_default();
        hex::encode(Sha256::digest(canonical.as_bytes()))
    }
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.hash_code == other.hash_code && self.genes == other.genes
    }
}

impl Serialize for Configuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.settings().serialize(serializer)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.settings().iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}={}(", stage.name, stage.algorithm)?;
            let mut first = true;
            for p in &stage.parameters {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}", p.name, p.value)?;
                first = false;
            }
            for sub in &stage.sub_executions {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "<{}>", sub)?;
                first = false;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("hash_code", &self.hash_code)
            .field("settings", &self.to_string())
            .finish()
    }
}
