use crate::types::StageKind;

/// What the catalogue knows about a constructable algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDescriptor {
    /// Catalogue name (e.g. "Ema")
    pub name: String,
    pub kind: StageKind,
    /// Minimum number of sub-execution slots a stage using this algorithm must declare
    pub min_sub_executions: usize,
}

impl StageDescriptor {
    pub fn stock(name: impl Into<String>, min_sub_executions: usize) -> Self {
        Self {
            name: name.into(),
            kind: StageKind::Stock,
            min_sub_executions,
        }
    }

    pub fn eod(name: impl Into<String>, min_sub_executions: usize) -> Self {
        Self {
            name: name.into(),
            kind: StageKind::Eod,
            min_sub_executions,
        }
    }
}

/// Resolves algorithm names while a configuration space is built
pub trait AlgorithmCatalogue: Send + Sync {
    fn resolve(&self, name: &str) -> Option<StageDescriptor>;

    fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}
