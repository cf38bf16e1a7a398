use super::traits::{invalid, ConfigSection};
use crate::engines::metrics::{
    CandidateComparator, HashCodeComparator, MetricsComparator, ThenComparator, WeightedSumCost,
};
use crate::error::SearchError;
use crate::types::MetricType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Metric values, then hash code
    Metrics,
    HashCode,
}

/// Cost weights and tie-break rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConfig {
    pub tie_break: TieBreak,
    /// Metric name -> weight
    pub weights: BTreeMap<String, f64>,
}

impl Default for CostConfig {
    fn default() -> Self {
        let weights = [
            (MetricType::AvGain, 0.5),
            (MetricType::WinProb, 1000.0),
            (MetricType::Kelly, 0.6),
            (MetricType::MaxLoss, -0.4),
            (MetricType::Month12AvGain, 0.6),
        ]
        .into_iter()
        .map(|(m, w)| (m.name().to_string(), w))
        .collect();
        Self {
            weights,
            tie_break: TieBreak::Metrics,
        }
    }
}

impl CostConfig {
    pub fn cost_function(&self) -> Result<WeightedSumCost, SearchError> {
        let weights = self
            .weights
            .iter()
            .map(|(name, &weight)| {
                let metric = name
                    .parse::<MetricType>()
                    .map_err(|e| invalid(Self::section_name(), e))?;
                Ok((metric, weight))
            })
            .collect::<Result<Vec<_>, SearchError>>()?;
        Ok(WeightedSumCost::from_weights(weights))
    }

    pub fn comparator(&self) -> Arc<dyn CandidateComparator> {
        match self.tie_break {
            TieBreak::Metrics => Arc::new(ThenComparator(MetricsComparator, HashCodeComparator)),
            TieBreak::HashCode => Arc::new(HashCodeComparator),
        }
    }
}

impl ConfigSection for CostConfig {
    fn section_name() -> &'static str {
        "cost"
    }

    fn validate(&self) -> Result<(), SearchError> {
        if let Some((name, _)) = self.weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(invalid(
                Self::section_name(),
                format!("weight for '{}' must be finite", name),
            ));
        }
        self.cost_function().map(|_| ())
    }
}
