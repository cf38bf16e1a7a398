use std::collections::HashMap;

use super::traits::{AlgorithmCatalogue, StageDescriptor};
use crate::types::StageKind;

/// In-memory algorithm catalogue keyed by algorithm name
pub struct AlgorithmRegistry {
    algorithms: HashMap<String, StageDescriptor>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            algorithms: HashMap::new(),
        }
    }

    /// Register (or replace) an algorithm
    pub fn register(&mut self, descriptor: StageDescriptor) -> &mut Self {
        self.algorithms.insert(descriptor.name.clone(), descriptor);
        self
    }

    pub fn with(mut self, descriptor: StageDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn get_by_kind(&self, kind: StageKind) -> Vec<StageDescriptor> {
        let mut found: Vec<_> = self
            .algorithms
            .values()
            .filter(|d| d.kind == kind)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AlgorithmCatalogue for AlgorithmRegistry {
    fn resolve(&self, name: &str) -> Option<StageDescriptor> {
        self.algorithms.get(name).cloned()
    }
}
