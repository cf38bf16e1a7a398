use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Backtest metrics produced by an evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    AvGain,
    WinProb,
    Freq,
    Kelly,
    Month12AvGain,
    MaxLoss,
}

impl MetricType {
    /// Fixed metric order, also used for tie-breaking
    pub const ALL: [MetricType; 6] = [
        MetricType::AvGain,
        MetricType::WinProb,
        MetricType::Freq,
        MetricType::Kelly,
        MetricType::Month12AvGain,
        MetricType::MaxLoss,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricType::AvGain => "av_gain",
            MetricType::WinProb => "win_prob",
            MetricType::Freq => "freq",
            MetricType::Kelly => "kelly",
            MetricType::Month12AvGain => "month12_av_gain",
            MetricType::MaxLoss => "max_loss",
        }
    }
}

impl FromStr for MetricType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricType::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| format!("unknown metric '{}'", s))
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metric values for one evaluated configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    values: BTreeMap<MetricType, f64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metric(mut self, metric: MetricType, value: f64) -> Self {
        self.values.insert(metric, value);
        self
    }

    pub fn set(&mut self, metric: MetricType, value: f64) {
        self.values.insert(metric, value);
    }

    pub fn get(&self, metric: MetricType) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricType, f64)> + '_ {
        self.values.iter().map(|(m, v)| (*m, *v))
    }
}

/// Concrete value assigned to a parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Integer(v) => write!(f, "{}", v),
            ParameterValue::Float(v) => write!(f, "{}", v),
            ParameterValue::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Level at which a stage runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Per-stock indicator
    Stock,
    /// End-of-day decision algorithm
    Eod,
}

/// Inclusive date range a backtest runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl BacktestPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }
}
