use crate::engines::generation::selector::ScoredCandidate;
use crate::types::MetricType;
use std::cmp::Ordering;

/// Tie-break for candidates of equal cost.
///
/// `Ordering::Greater` means `a` ranks above `b`.
pub trait CandidateComparator: Send + Sync {
    fn compare(&self, a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering;
}

/// Compares metric values in [`MetricType::ALL`] order; larger wins, a
/// present metric beats a missing one.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsComparator;

impl CandidateComparator for MetricsComparator {
    fn compare(&self, a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
        for metric in MetricType::ALL {
            let ordering = match (a.metrics.get(metric), b.metrics.get(metric)) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Orders by the stable configuration hash code (smaller hash ranks higher)
#[derive(Debug, Clone, Copy, Default)]
pub struct HashCodeComparator;

impl CandidateComparator for HashCodeComparator {
    fn compare(&self, a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
        b.configuration
            .hash_code()
            .cmp(a.configuration.hash_code())
    }
}

/// Falls back to the second comparator when the first reports a tie
pub struct ThenComparator<A, B>(pub A, pub B);

impl<A: CandidateComparator, B: CandidateComparator> CandidateComparator for ThenComparator<A, B> {
    fn compare(&self, a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
        self.0.compare(a, b).then_with(|| self.1.compare(a, b))
    }
}
