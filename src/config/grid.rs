use super::traits::{invalid, ConfigSection};
use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Parameters of the exhaustive grid search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSearchConfig {
    pub thread_amount: usize,
    /// Configurations evaluated between cancellation checks
    pub batch_size: usize,
    /// Number of best strategies kept
    pub selector_capacity: usize,
    /// Grid index to resume from
    #[serde(default)]
    pub start_index: u64,
}

impl Default for GridSearchConfig {
    fn default() -> Self {
        Self {
            thread_amount: 4,
            batch_size: 256,
            selector_capacity: 100,
            start_index: 0,
        }
    }
}

impl ConfigSection for GridSearchConfig {
    fn section_name() -> &'static str {
        "grid"
    }

    fn validate(&self) -> Result<(), SearchError> {
        let section = Self::section_name();
        if self.thread_amount == 0 {
            return Err(invalid(section, "thread_amount must be positive"));
        }
        if self.batch_size == 0 {
            return Err(invalid(section, "batch_size must be positive"));
        }
        if self.selector_capacity == 0 {
            return Err(invalid(section, "selector_capacity must be positive"));
        }
        Ok(())
    }
}
