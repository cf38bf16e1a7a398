pub mod comparator;
pub mod cost;

pub use comparator::{CandidateComparator, HashCodeComparator, MetricsComparator, ThenComparator};
pub use cost::{CostFunction, WeightedSumCost};
