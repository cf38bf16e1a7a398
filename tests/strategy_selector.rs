mod common;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread;
use stratsearch::engines::generation::ScoredCandidate;
use stratsearch::engines::metrics::{HashCodeComparator, MetricsComparator, ThenComparator};
use stratsearch::StrategySelector;

fn shuffled_candidates(n: usize, seed: u64) -> Vec<ScoredCandidate> {
    let mut costs: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
    costs.shuffle(&mut StdRng::seed_from_u64(seed));
    common::distinct_configurations(n)
        .into_iter()
        .zip(costs)
        .map(|(configuration, cost)| common::scored(configuration, cost))
        .collect()
}

fn hash_codes(candidates: &[ScoredCandidate]) -> Vec<String> {
    candidates.iter().map(|c| c.hash_code().to_string()).collect()
}

#[test]
fn test_keeps_top_k_in_best_first_order() {
    let candidates = shuffled_candidates(200, 1);
    let selector = StrategySelector::new(10, Arc::new(HashCodeComparator)).unwrap();
    for candidate in candidates {
        selector.insert(candidate);
    }

    let snapshot = selector.snapshot();
    assert_eq!(snapshot.len(), 10);
    let costs: Vec<f64> = snapshot.iter().map(|c| c.cost).collect();
    let expected: Vec<f64> = (190..200).rev().map(|i| i as f64 * 0.5).collect();
    assert_eq!(costs, expected);
    assert_eq!(selector.best().unwrap().cost, 99.5);
}

#[test]
fn test_insert_reports_acceptance() {
    let mut candidates = shuffled_candidates(3, 2);
    candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    let selector = StrategySelector::new(2, Arc::new(HashCodeComparator)).unwrap();

    assert!(selector.insert(candidates[1].clone()));
    assert!(selector.insert(candidates[2].clone()));
    // full, and worse than everything held
    assert!(!selector.insert(candidates[0].clone()));
    assert_eq!(selector.len(), 2);
}

#[test]
fn test_duplicate_configurations_are_held_once() {
    let candidate = shuffled_candidates(1, 3).remove(0);
    let selector = StrategySelector::new(5, Arc::new(HashCodeComparator)).unwrap();

    assert!(selector.insert(candidate.clone()));
    let mut again = candidate;
    again.cost += 100.0;
    assert!(!selector.insert(again));
    assert_eq!(selector.len(), 1);
}

#[test]
fn test_equal_costs_fall_back_to_comparator() {
    let configurations = common::distinct_configurations(6);
    let selector = StrategySelector::new(3, Arc::new(HashCodeComparator)).unwrap();
    for configuration in configurations.iter().cloned() {
        selector.insert(common::scored(configuration, 1.0));
    }

    let mut expected: Vec<String> = configurations
        .iter()
        .map(|c| c.hash_code().to_string())
        .collect();
    expected.sort();
    expected.truncate(3);
    assert_eq!(hash_codes(&selector.snapshot()), expected);
}

#[test]
fn test_nan_cost_ranks_last() {
    let mut configurations = common::distinct_configurations(3).into_iter();
    let selector = StrategySelector::new(
        2,
        Arc::new(ThenComparator(MetricsComparator, HashCodeComparator)),
    )
    .unwrap();

    selector.insert(common::scored(configurations.next().unwrap(), f64::NAN));
    selector.insert(common::scored(configurations.next().unwrap(), -5.0));
    selector.insert(common::scored(configurations.next().unwrap(), 3.0));

    let costs: Vec<f64> = selector.snapshot().iter().map(|c| c.cost).collect();
    assert_eq!(costs, vec![3.0, -5.0]);
}

#[test]
fn test_concurrent_inserts_match_sequential() {
    let candidates = shuffled_candidates(400, 4);

    let sequential = StrategySelector::new(25, Arc::new(HashCodeComparator)).unwrap();
    for candidate in candidates.iter().cloned() {
        sequential.insert(candidate);
    }

    let concurrent = StrategySelector::new(25, Arc::new(HashCodeComparator)).unwrap();
    thread::scope(|scope| {
        for chunk in candidates.chunks(50) {
            let concurrent = &concurrent;
            scope.spawn(move || {
                for candidate in chunk.iter().cloned() {
                    concurrent.insert(candidate);
                }
            });
        }
    });

    assert_eq!(concurrent.len(), 25);
    assert_eq!(
        hash_codes(&concurrent.snapshot()),
        hash_codes(&sequential.snapshot())
    );
}

#[test]
fn test_zero_capacity_is_rejected() {
    assert!(StrategySelector::new(0, Arc::new(HashCodeComparator)).is_err());
}
