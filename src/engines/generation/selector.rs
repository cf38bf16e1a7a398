use super::genome::Configuration;
use crate::engines::metrics::CandidateComparator;
use crate::error::{Result, SearchError};
use crate::types::Metrics;

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An evaluated configuration with its metrics and cost
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub configuration: Configuration,
    pub metrics: Metrics,
    pub cost: f64,
}

impl ScoredCandidate {
    pub fn new(configuration: Configuration, metrics: Metrics, cost: f64) -> Self {
        Self {
            configuration,
            metrics,
            cost,
        }
    }

    pub fn hash_code(&self) -> &str {
        self.configuration.hash_code()
    }
}

/// Best-first ordering: cost descending, then the tie-break comparator.
/// `Ordering::Less` means `a` ranks ahead of `b`. NaN costs rank last.
pub fn rank_candidates(
    a: &ScoredCandidate,
    b: &ScoredCandidate,
    comparator: &dyn CandidateComparator,
) -> Ordering {
    sortable_cost(b.cost)
        .total_cmp(&sortable_cost(a.cost))
        .then_with(|| comparator.compare(b, a))
}

fn sortable_cost(cost: f64) -> f64 {
    if cost.is_nan() {
        f64::NEG_INFINITY
    } else {
        cost
    }
}

struct SelectorState {
    /// Best-first
    strategies: Vec<Arc<ScoredCandidate>>,
    seen_hash_codes: HashSet<String>,
}

/// Bounded top-K of every candidate seen during a search.
///
/// All mutation happens inside one mutex-guarded critical section, so
/// concurrent inserts from evaluation workers never exceed the capacity and
/// never lose a candidate that beats the current minimum.
pub struct StrategySelector {
    capacity: usize,
    comparator: Arc<dyn CandidateComparator>,
    state: Mutex<SelectorState>,
}

impl StrategySelector {
    pub fn new(capacity: usize, comparator: Arc<dyn CandidateComparator>) -> Result<Self> {
        if capacity == 0 {
            return Err(SearchError::Configuration(
                "selector capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            capacity,
            comparator,
            state: Mutex::new(SelectorState {
                strategies: Vec::with_capacity(capacity),
                seen_hash_codes: HashSet::with_capacity(capacity),
            }),
        })
    }

    /// Offer a candidate. Returns whether it was kept.
    ///
    /// A configuration already held (same hash code) is rejected.
    pub fn insert(&self, candidate: ScoredCandidate) -> bool {
        let comparator = self.comparator.as_ref();
        let mut state = self.lock();

        if state.seen_hash_codes.contains(candidate.hash_code()) {
            return false;
        }

        if state.strategies.len() >= self.capacity {
            let improves = state
                .strategies
                .last()
                .map(|worst| rank_candidates(&candidate, worst, comparator) == Ordering::Less)
                .unwrap_or(true);
            if !improves {
                return false;
            }
            if let Some(evicted) = state.strategies.pop() {
                state.seen_hash_codes.remove(evicted.hash_code());
            }
        }

        let position = state.strategies.partition_point(|held| {
            rank_candidates(held, &candidate, comparator) != Ordering::Greater
        });
        state.seen_hash_codes.insert(candidate.hash_code().to_string());
        state.strategies.insert(position, Arc::new(candidate));
        true
    }

    /// Current best candidates, best-first
    pub fn snapshot(&self) -> Vec<ScoredCandidate> {
        let held: Vec<Arc<ScoredCandidate>> = self.lock().strategies.clone();
        held.iter().map(|c| c.as_ref().clone()).collect()
    }

    pub fn best(&self) -> Option<ScoredCandidate> {
        self.lock().strategies.first().map(|c| c.as_ref().clone())
    }

    pub fn len(&self) -> usize {
        self.lock().strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().strategies.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn comparator(&self) -> &Arc<dyn CandidateComparator> {
        &self.comparator
    }

    fn lock(&self) -> MutexGuard<'_, SelectorState> {
        // The state is consistent after every statement that can panic, so a
        // poisoned lock is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
