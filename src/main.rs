use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use chrono::NaiveDate;
use stratsearch::config::{AppConfig, ConfigManager};
use stratsearch::engines::generation::LogProgressCallback;
use stratsearch::{
    AlgorithmRegistry, BacktestPeriod, Configuration, ConfigurationSpace, EvaluationError,
    Evaluator, GeneticSearchOrchestrator, GridEnumerator, MetricType, Metrics,
    ParameterDescriptor, ParameterValue, StageDescriptor, StageParameters,
};

/// Stand-in backtest: metrics derived deterministically from the strategy
/// hash code, nudged by a few parameter values.
struct SyntheticEvaluator;

impl Evaluator for SyntheticEvaluator {
    fn evaluate(&self, configuration: &Configuration) -> Result<Metrics, EvaluationError> {
        let seed = u64::from_str_radix(&configuration.hash_code()[..16], 16)
            .map_err(|e| EvaluationError::new(e.to_string()))?;
        let mut rng = StdRng::seed_from_u64(seed);

        let holding = match configuration.value("pnm", "n") {
            Some(ParameterValue::Integer(n)) => n as f64,
            _ => return Err(EvaluationError::new("pnm.n missing")),
        };
        let long_bias = match configuration.value("pnm", "side") {
            Some(ParameterValue::Text(side)) if side == "long" => 0.05,
            _ => 0.0,
        };

        let win_prob = (0.35 + long_bias + rng.gen::<f64>() * 0.3).min(1.0);
        Ok(Metrics::new()
            .with_metric(MetricType::AvGain, rng.gen_range(-2.0..4.0) * holding / 250.0)
            .with_metric(MetricType::WinProb, win_prob)
            .with_metric(MetricType::Freq, rng.gen_range(0.01..0.3))
            .with_metric(MetricType::Kelly, win_prob - (1.0 - win_prob) / 1.5)
            .with_metric(MetricType::Month12AvGain, rng.gen_range(-1.0..3.0))
            .with_metric(MetricType::MaxLoss, rng.gen_range(0.0..25.0)))
    }
}

fn demo_catalogue() -> AlgorithmRegistry {
    AlgorithmRegistry::new()
        .with(StageDescriptor::stock("In", 0))
        .with(StageDescriptor::stock("Ema", 1))
        .with(StageDescriptor::stock("Sma", 1))
        .with(StageDescriptor::eod("PositionNDayMStocks", 1))
}

fn demo_space(catalogue: &AlgorithmRegistry) -> stratsearch::Result<ConfigurationSpace> {
    let period = NaiveDate::from_ymd_opt(2013, 1, 1)
        .zip(NaiveDate::from_ymd_opt(2014, 1, 1))
        .and_then(|(from, to)| BacktestPeriod::new(from, to))
        .ok_or_else(|| stratsearch::SearchError::Configuration("bad period".to_string()))?;

    ConfigurationSpace::builder(catalogue, period)
        .add_stock(
            "in",
            "In",
            StageParameters::new().add(ParameterDescriptor::enumerated("e", ["open", "close"])?),
        )?
        .add_stock(
            "ema",
            "Ema",
            StageParameters::new()
                .add(ParameterDescriptor::float("P", 0.1, 1.11, 0.2)?)
                .add(ParameterDescriptor::sub_execution("", ["in"])?),
        )?
        .add_stock(
            "sma",
            "Sma",
            StageParameters::new()
                .add(ParameterDescriptor::integer("n", 5, 15, 1)?)
                .add(ParameterDescriptor::sub_execution("", ["in"])?),
        )?
        .add_eod(
            "pnm",
            "PositionNDayMStocks",
            StageParameters::new()
                .add(ParameterDescriptor::sub_execution("", ["ema", "sma"])?)
                .add(ParameterDescriptor::integer("n", 22, 250, 20)?)
                .add(ParameterDescriptor::integer("m", 20, 40, 2)?)
                .add(ParameterDescriptor::float("ps", 2500.0, 50000.0, 2500.0)?)
                .add(ParameterDescriptor::enumerated("side", ["long", "short"])?),
        )?
        .build()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let manager = ConfigManager::new();
            manager.load_from_file(&path)?;
            manager.get()
        }
        None => AppConfig::default(),
    };

    let catalogue = demo_catalogue();
    let space = Arc::new(demo_space(&catalogue)?);
    println!("Size: {}", GridEnumerator::new(Arc::clone(&space))?.size());

    let mut searcher = GeneticSearchOrchestrator::new(
        config.genetic.clone(),
        space,
        Arc::new(SyntheticEvaluator),
        Arc::new(config.cost.cost_function()?),
        config.cost.comparator(),
    )?;
    let outcome = searcher.run(LogProgressCallback)?;

    println!("  Cost\tAvGain\tWinProb\tFreq\tKelly\tHash");
    for strategy in outcome.strategies.iter().take(10) {
        let metric = |m: MetricType| strategy.metrics.get(m).unwrap_or(0.0);
        println!(
            "{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}",
            strategy.cost,
            metric(MetricType::AvGain),
            metric(MetricType::WinProb),
            metric(MetricType::Freq),
            metric(MetricType::Kelly),
            &strategy.hash_code()[..16]
        );
    }
    if let Some(best) = outcome.strategies.first() {
        println!("Best strategy:\n{}", best.configuration.to_json()?);
    }
    println!(
        "{} generations, {} evaluations, {} failed",
        outcome.generations, outcome.evaluations, outcome.evaluation_failures
    );

    Ok(())
}
