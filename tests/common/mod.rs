#![allow(dead_code)]

use chrono::NaiveDate;
use std::sync::Arc;
use stratsearch::engines::generation::ScoredCandidate;
use stratsearch::{
    AlgorithmRegistry, BacktestPeriod, Configuration, ConfigurationSpace, GridEnumerator,
    MetricType, Metrics, ParameterDescriptor, ParameterValue, StageDescriptor, StageParameters,
    WeightedSumCost,
};

pub fn period() -> BacktestPeriod {
    BacktestPeriod::new(
        NaiveDate::from_ymd_opt(2013, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2014, 1, 1).unwrap(),
    )
    .unwrap()
}

pub fn catalogue() -> AlgorithmRegistry {
    AlgorithmRegistry::new()
        .with(StageDescriptor::stock("In", 0))
        .with(StageDescriptor::stock("Ema", 1))
        .with(StageDescriptor::stock("Sma", 1))
        .with(StageDescriptor::stock("Level", 1))
        .with(StageDescriptor::stock("Cross", 2))
        .with(StageDescriptor::eod("OneSide", 0))
        .with(StageDescriptor::eod("PositionNDayMStocks", 1))
}

fn sub(candidates: &[&str]) -> ParameterDescriptor {
    ParameterDescriptor::sub_execution("", candidates.iter().copied()).unwrap()
}

/// Single decision stage with one integer parameter `n` in 0..=max
pub fn single_gene_space(max: i64) -> Arc<ConfigurationSpace> {
    let catalogue = catalogue();
    let space = ConfigurationSpace::builder(&catalogue, period())
        .add_eod(
            "os",
            "OneSide",
            StageParameters::new().add(ParameterDescriptor::integer("n", 0, max, 1).unwrap()),
        )
        .unwrap()
        .build()
        .unwrap();
    Arc::new(space)
}

/// Two 7-value numeric descriptors (50..=350 step 50)
pub fn forty_nine_space() -> Arc<ConfigurationSpace> {
    let catalogue = catalogue();
    let space = ConfigurationSpace::builder(&catalogue, period())
        .add_stock(
            "in",
            "In",
            StageParameters::new().add(ParameterDescriptor::integer("i", 50, 350, 50).unwrap()),
        )
        .unwrap()
        .add_eod(
            "os",
            "OneSide",
            StageParameters::new().add(ParameterDescriptor::float("u", 50.0, 350.0, 50.0).unwrap()),
        )
        .unwrap()
        .build()
        .unwrap();
    Arc::new(space)
}

/// Small two-level graph: 2 * 2 * 3 * (2 * 3) = 72 configurations
pub fn small_dag_space() -> Arc<ConfigurationSpace> {
    let catalogue = catalogue();
    let space = ConfigurationSpace::builder(&catalogue, period())
        .add_stock(
            "in",
            "In",
            StageParameters::new()
                .add(ParameterDescriptor::enumerated("e", ["open", "close"]).unwrap()),
        )
        .unwrap()
        .add_stock(
            "ema",
            "Ema",
            StageParameters::new()
                .add(ParameterDescriptor::float("P", 0.1, 0.3, 0.2).unwrap())
                .add(sub(&["in"])),
        )
        .unwrap()
        .add_stock(
            "sma",
            "Sma",
            StageParameters::new()
                .add(ParameterDescriptor::integer("n", 5, 7, 1).unwrap())
                .add(sub(&["in"])),
        )
        .unwrap()
        .add_eod(
            "pnm",
            "PositionNDayMStocks",
            StageParameters::new()
                .add(sub(&["ema", "sma"]))
                .add(ParameterDescriptor::integer("n", 10, 30, 10).unwrap()),
        )
        .unwrap()
        .build()
        .unwrap();
    Arc::new(space)
}

/// Multi-level dependency graph with shared upstream stages
pub fn chained_space() -> Arc<ConfigurationSpace> {
    let catalogue = catalogue();
    let space = ConfigurationSpace::builder(&catalogue, period())
        .add_stock(
            "in",
            "In",
            StageParameters::new()
                .add(ParameterDescriptor::enumerated("e", ["open", "close", "high"]).unwrap()),
        )
        .unwrap()
        .add_stock(
            "ema",
            "Ema",
            StageParameters::new()
                .add(ParameterDescriptor::float("P", 0.1, 0.5, 0.2).unwrap())
                .add(sub(&["in"])),
        )
        .unwrap()
        .add_stock(
            "sma",
            "Sma",
            StageParameters::new()
                .add(ParameterDescriptor::integer("n", 5, 9, 1).unwrap())
                .add(sub(&["in"])),
        )
        .unwrap()
        .add_stock(
            "level",
            "Level",
            StageParameters::new()
                .add(ParameterDescriptor::float("f", 15.0, 20.0, 1.5).unwrap())
                .add(sub(&["ema", "sma"])),
        )
        .unwrap()
        .add_stock(
            "cross",
            "Cross",
            StageParameters::new()
                .add(sub(&["ema", "sma"]))
                .add(ParameterDescriptor::integer("k", 1, 3, 1).unwrap())
                .add(sub(&["sma", "level"])),
        )
        .unwrap()
        .add_eod(
            "pnm",
            "PositionNDayMStocks",
            StageParameters::new()
                .add(sub(&["level", "cross"]))
                .add(sub(&["ema", "sma", "cross"]))
                .add(ParameterDescriptor::integer("n", 1, 32, 4).unwrap()),
        )
        .unwrap()
        .add_eod(
            "os",
            "OneSide",
            StageParameters::new()
                .add(ParameterDescriptor::enumerated("side", ["long", "short"]).unwrap()),
        )
        .unwrap()
        .build()
        .unwrap();
    Arc::new(space)
}

/// First `n` configurations of a single-gene space, all distinct
pub fn distinct_configurations(n: usize) -> Vec<Configuration> {
    let mut grid = GridEnumerator::new(single_gene_space(n as i64 - 1)).unwrap();
    grid.by_ref().take(n).collect()
}

pub fn scored(configuration: Configuration, cost: f64) -> ScoredCandidate {
    let metrics = Metrics::new().with_metric(MetricType::AvGain, cost);
    ScoredCandidate::new(configuration, metrics, cost)
}

/// Value of the `os.n` gene of a [`single_gene_space`] configuration
pub fn gene_value(configuration: &Configuration) -> f64 {
    match configuration.value("os", "n") {
        Some(ParameterValue::Integer(n)) => n as f64,
        other => panic!("unexpected os.n value {:?}", other),
    }
}

/// Reports the gene value as `av_gain`
pub fn gene_metrics(configuration: &Configuration) -> Metrics {
    Metrics::new().with_metric(MetricType::AvGain, gene_value(configuration))
}

/// Cost equal to `av_gain`
pub fn av_gain_cost() -> WeightedSumCost {
    WeightedSumCost::new().with_parameter(MetricType::AvGain, 1.0)
}
