use super::parameter::ParameterDescriptor;
use crate::error::{Result, SearchError};
use crate::types::StageKind;
use std::collections::HashSet;

/// Ordered tunable parameters of one stage, before it is placed in a space.
///
/// Sub-execution descriptors may be interleaved with ordinary parameters; they
/// become the stage's sub-execution slots in declaration order.
#[derive(Debug, Clone, Default)]
pub struct StageParameters {
    descriptors: Vec<ParameterDescriptor>,
}

impl StageParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, descriptor: ParameterDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    pub fn push(&mut self, descriptor: ParameterDescriptor) {
        self.descriptors.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub(crate) fn into_descriptors(self) -> Vec<ParameterDescriptor> {
        self.descriptors
    }
}

/// A sub-execution slot resolved against the stages declared before it
#[derive(Debug, Clone, PartialEq)]
pub struct SubExecutionSlot {
    descriptor: ParameterDescriptor,
    /// Stage indices, parallel to the descriptor's candidates
    targets: Vec<usize>,
}

impl SubExecutionSlot {
    pub(crate) fn new(descriptor: ParameterDescriptor, targets: Vec<usize>) -> Self {
        Self { descriptor, targets }
    }

    pub fn descriptor(&self) -> &ParameterDescriptor {
        &self.descriptor
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn count(&self) -> u64 {
        self.targets.len() as u64
    }

    pub fn target(&self, choice: usize) -> Option<usize> {
        self.targets.get(choice).copied()
    }
}

/// One tunable algorithm instance inside a configuration space
#[derive(Debug, Clone, PartialEq)]
pub struct StageSpec {
    name: String,
    algorithm: String,
    kind: StageKind,
    parameters: Vec<ParameterDescriptor>,
    sub_executions: Vec<SubExecutionSlot>,
}

impl StageSpec {
    pub(crate) fn new(
        name: String,
        algorithm: String,
        kind: StageKind,
        parameters: Vec<ParameterDescriptor>,
        sub_executions: Vec<SubExecutionSlot>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        for p in &parameters {
            if !seen.insert(p.name()) {
                return Err(SearchError::Structural(format!(
                    "stage '{}': parameter '{}' declared twice",
                    name,
                    p.name()
                )));
            }
        }
        Ok(Self {
            name,
            algorithm,
            kind,
            parameters,
            sub_executions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn sub_executions(&self) -> &[SubExecutionSlot] {
        &self.sub_executions
    }

    pub fn parameter_index(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name() == name)
    }

    /// Number of genes (parameters plus sub-execution slots)
    pub fn gene_count(&self) -> usize {
        self.parameters.len() + self.sub_executions.len()
    }
}
