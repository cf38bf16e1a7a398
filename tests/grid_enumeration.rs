mod common;

use std::collections::HashSet;
use std::sync::Arc;
use stratsearch::{
    ConfigurationSpace, GridEnumerator, ParameterDescriptor, ParameterValue, SearchError,
    StageParameters,
};

#[test]
fn test_two_seven_value_descriptors_give_49() {
    let grid = GridEnumerator::new(common::forty_nine_space()).unwrap();
    assert_eq!(grid.size(), 49);
}

#[test]
fn test_size_multiplies_parameter_and_slot_counts() {
    let grid = GridEnumerator::new(common::chained_space()).unwrap();
    // in(3) * ema(3*1) * sma(5*1) * level(4*2) * cross(2*3*2) * pnm(2*3*8) * os(2)
    assert_eq!(grid.size(), 3 * 3 * 5 * 8 * 12 * 48 * 2);
}

#[test]
fn test_enumeration_is_exhaustive_and_unique() {
    let mut grid = GridEnumerator::new(common::small_dag_space()).unwrap();
    let size = grid.size();
    assert_eq!(size, 72);

    let mut hash_codes = HashSet::new();
    for _ in 0..size {
        let configuration = grid.next_configuration().expect("grid ended early");
        assert!(hash_codes.insert(configuration.hash_code().to_string()));
    }
    assert!(grid.is_finished());
    assert!(grid.next_configuration().is_none());
    assert_eq!(hash_codes.len() as u64, size);
}

#[test]
fn test_enumeration_is_deterministic() {
    let first: Vec<String> = GridEnumerator::new(common::forty_nine_space())
        .unwrap()
        .map(|c| c.hash_code().to_string())
        .collect();
    let second: Vec<String> = GridEnumerator::new(common::forty_nine_space())
        .unwrap()
        .map(|c| c.hash_code().to_string())
        .collect();
    assert_eq!(first.len(), 49);
    assert_eq!(first, second);
}

#[test]
fn test_first_declared_parameter_varies_fastest() {
    let mut grid = GridEnumerator::new(common::forty_nine_space()).unwrap();
    let values: Vec<(ParameterValue, ParameterValue)> = grid
        .by_ref()
        .take(8)
        .map(|c| (c.value("in", "i").unwrap(), c.value("os", "u").unwrap()))
        .collect();

    for (k, (i, u)) in values.iter().take(7).enumerate() {
        assert_eq!(*i, ParameterValue::Integer(50 + 50 * k as i64));
        assert_eq!(*u, ParameterValue::Float(50.0));
    }
    // carry into the second digit
    assert_eq!(values[7].0, ParameterValue::Integer(50));
    assert_eq!(values[7].1, ParameterValue::Float(100.0));
}

#[test]
fn test_empty_space_yields_one_trivial_configuration() {
    let space = Arc::new(ConfigurationSpace::empty(common::period()));
    let mut grid = GridEnumerator::new(space).unwrap();
    assert_eq!(grid.size(), 1);
    let trivial = grid.next_configuration().unwrap();
    assert!(trivial.genes().is_empty());
    assert!(grid.is_finished());
    assert!(grid.next_configuration().is_none());
}

#[test]
fn test_single_value_digits_never_advance() {
    let catalogue = common::catalogue();
    let space = ConfigurationSpace::builder(&catalogue, common::period())
        .add_eod(
            "os",
            "OneSide",
            StageParameters::new()
                .add(ParameterDescriptor::integer("fixed", 7, 7, 1).unwrap())
                .add(ParameterDescriptor::enumerated("side", ["long", "short"]).unwrap()),
        )
        .unwrap()
        .build()
        .unwrap();
    let configurations: Vec<_> = GridEnumerator::new(Arc::new(space)).unwrap().collect();
    assert_eq!(configurations.len(), 2);
    for c in &configurations {
        assert_eq!(c.value("os", "fixed"), Some(ParameterValue::Integer(7)));
    }
}

#[test]
fn test_overflow_is_reported() {
    let catalogue = common::catalogue();
    let mut parameters = StageParameters::new();
    for i in 0..8 {
        parameters.push(ParameterDescriptor::integer(format!("p{}", i), 0, 1 << 20, 1).unwrap());
    }
    let space = ConfigurationSpace::builder(&catalogue, common::period())
        .add_eod("os", "OneSide", parameters)
        .unwrap()
        .build()
        .unwrap();
    assert!(matches!(
        GridEnumerator::new(Arc::new(space)),
        Err(SearchError::EnumerationOverflow { .. })
    ));
}

#[test]
fn test_seek_resumes_where_enumeration_left_off() {
    let space = common::chained_space();
    let full: Vec<String> = GridEnumerator::new(Arc::clone(&space))
        .unwrap()
        .take(500)
        .map(|c| c.hash_code().to_string())
        .collect();

    let mut resumed = GridEnumerator::new(Arc::clone(&space)).unwrap();
    resumed.seek(321).unwrap();
    assert_eq!(resumed.position(), 321);
    let tail: Vec<String> = resumed
        .by_ref()
        .take(179)
        .map(|c| c.hash_code().to_string())
        .collect();
    assert_eq!(tail, full[321..]);
    assert_eq!(resumed.position(), 500);

    let grid = GridEnumerator::new(space).unwrap();
    assert_eq!(grid.configuration_at(42).unwrap().hash_code(), full[42]);
}

#[test]
fn test_seek_bounds() {
    let mut grid = GridEnumerator::new(common::forty_nine_space()).unwrap();
    assert!(grid.seek(50).is_err());
    assert!(grid.configuration_at(49).is_err());

    grid.seek(49).unwrap();
    assert!(grid.is_finished());
    assert!(grid.next_configuration().is_none());

    grid.seek(48).unwrap();
    assert!(!grid.is_finished());
    assert!(grid.next_configuration().is_some());
    assert!(grid.is_finished());
}

#[test]
fn test_configuration_json_lists_every_stage() {
    let configuration = GridEnumerator::new(common::small_dag_space())
        .unwrap()
        .configuration_at(5)
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&configuration.to_json().unwrap()).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|stage| stage["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["in", "ema", "sma", "pnm"]);
    assert_eq!(json[3]["sub_executions"].as_array().unwrap().len(), 1);
}
