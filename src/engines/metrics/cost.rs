use crate::types::{MetricType, Metrics};
use std::collections::BTreeMap;

/// Scalar ranking of evaluated metrics. Higher is better.
pub trait CostFunction: Send + Sync {
    fn cost(&self, metrics: &Metrics) -> f64;
}

/// `Σ weight[m] * metrics[m]` over the weighted metrics.
///
/// Metrics without a weight, or weighted but missing from the input,
/// contribute nothing. Terms are summed in metric order so the result is
/// bit-identical for identical inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedSumCost {
    weights: BTreeMap<MetricType, f64>,
}

impl WeightedSumCost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, metric: MetricType, weight: f64) -> Self {
        self.weights.insert(metric, weight);
        self
    }

    pub fn from_weights(weights: impl IntoIterator<Item = (MetricType, f64)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    pub fn weights(&self) -> &BTreeMap<MetricType, f64> {
        &self.weights
    }
}

impl CostFunction for WeightedSumCost {
    fn cost(&self, metrics: &Metrics) -> f64 {
        let mut cost = 0.0;
        for (metric, weight) in &self.weights {
            if let Some(value) = metrics.get(*metric) {
                cost += weight * value;
            }
        }
        cost
    }
}
