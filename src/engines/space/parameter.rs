use crate::error::{Result, SearchError};
use crate::types::ParameterValue;
use std::collections::HashSet;

/// Absorbs representation error in float step counts (0.3 / 0.1 = 2.9999...)
const FLOAT_STEP_EPSILON: f64 = 1e-9;

/// Neighbouring float values must be this many ULPs apart to stay distinct
/// after rounding
const MIN_FLOAT_STEP_ULPS: f64 = 4.0;

/// The achievable values of one tunable parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterDomain {
    Integer { min: i64, max: i64, step: i64 },
    Float { min: f64, max: f64, step: f64 },
    Enumerated { values: Vec<String> },
    /// One-of-several upstream stock stages
    SubExecution { candidates: Vec<String> },
}

/// A named, validated parameter domain. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    name: String,
    domain: ParameterDomain,
    count: u64,
}

impl ParameterDescriptor {
    pub fn integer(name: impl Into<String>, min: i64, max: i64, step: i64) -> Result<Self> {
        let name = name.into();
        if min > max {
            return Err(SearchError::Structural(format!(
                "parameter '{}': min {} is greater than max {}",
                name, min, max
            )));
        }
        if step <= 0 {
            return Err(SearchError::Structural(format!(
                "parameter '{}': step must be positive, got {}",
                name, step
            )));
        }
        let span = max as i128 - min as i128;
        let count = u64::try_from(span / step as i128 + 1).map_err(|_| {
            SearchError::Structural(format!("parameter '{}': too many values", name))
        })?;
        Ok(Self {
            name,
            domain: ParameterDomain::Integer { min, max, step },
            count,
        })
    }

    pub fn float(name: impl Into<String>, min: f64, max: f64, step: f64) -> Result<Self> {
        let name = name.into();
        if !min.is_finite() || !max.is_finite() || !step.is_finite() {
            return Err(SearchError::Structural(format!(
                "parameter '{}': bounds and step must be finite",
                name
            )));
        }
        if min > max {
            return Err(SearchError::Structural(format!(
                "parameter '{}': min {} is greater than max {}",
                name, min, max
            )));
        }
        if step <= 0.0 {
            return Err(SearchError::Structural(format!(
                "parameter '{}': step must be positive, got {}",
                name, step
            )));
        }
        if min < max && step < MIN_FLOAT_STEP_ULPS * ulp(min.abs().max(max.abs())) {
            return Err(SearchError::Structural(format!(
                "parameter '{}': step {} is too small to separate values near {}",
                name, step, max
            )));
        }
        let steps = ((max - min) / step + FLOAT_STEP_EPSILON).floor();
        if steps >= u64::MAX as f64 {
            return Err(SearchError::Structural(format!(
                "parameter '{}': too many values",
                name
            )));
        }
        Ok(Self {
            name,
            domain: ParameterDomain::Float { min, max, step },
            count: steps as u64 + 1,
        })
    }

    pub fn enumerated<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let name = name.into();
        let values = unique_non_empty(&name, values, "value")?;
        let count = values.len() as u64;
        Ok(Self {
            name,
            domain: ParameterDomain::Enumerated { values },
            count,
        })
    }

    pub fn sub_execution<S: Into<String>>(
        name: impl Into<String>,
        candidates: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let name = name.into();
        let candidates = unique_non_empty(&name, candidates, "candidate")?;
        let count = candidates.len() as u64;
        Ok(Self {
            name,
            domain: ParameterDomain::SubExecution { candidates },
            count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &ParameterDomain {
        &self.domain
    }

    pub fn is_sub_execution(&self) -> bool {
        matches!(self.domain, ParameterDomain::SubExecution { .. })
    }

    /// Number of achievable values
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Concrete value at `index` (`index < count()`).
    ///
    /// Sub-execution descriptors yield the candidate stage name.
    pub fn value_at(&self, index: u64) -> Option<ParameterValue> {
        if index >= self.count {
            return None;
        }
        let value = match &self.domain {
            ParameterDomain::Integer { min, step, .. } => {
                // stays within [min, max] because index < count
                ParameterValue::Integer((*min as i128 + index as i128 * *step as i128) as i64)
            }
            ParameterDomain::Float { min, max, step } => {
                ParameterValue::Float((min + index as f64 * step).min(*max))
            }
            ParameterDomain::Enumerated { values } => {
                ParameterValue::Text(values[index as usize].clone())
            }
            ParameterDomain::SubExecution { candidates } => {
                ParameterValue::Text(candidates[index as usize].clone())
            }
        };
        Some(value)
    }
}

/// Gap between `x` (finite, non-negative) and the next larger float
fn ulp(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1) - x
}

fn unique_non_empty<S: Into<String>>(
    name: &str,
    items: impl IntoIterator<Item = S>,
    what: &str,
) -> Result<Vec<String>> {
    let items: Vec<String> = items.into_iter().map(Into::into).collect();
    if items.is_empty() {
        return Err(SearchError::Structural(format!(
            "parameter '{}': empty {} set",
            name, what
        )));
    }
    let mut seen = HashSet::new();
    for item in &items {
        if !seen.insert(item.as_str()) {
            return Err(SearchError::Structural(format!(
                "parameter '{}': duplicate {} '{}'",
                name, what, item
            )));
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_count_is_inclusive() {
        let p = ParameterDescriptor::integer("n", 50, 350, 50).unwrap();
        assert_eq!(p.count(), 7);
        assert_eq!(p.value_at(0), Some(ParameterValue::Integer(50)));
        assert_eq!(p.value_at(6), Some(ParameterValue::Integer(350)));
        assert_eq!(p.value_at(7), None);
    }

    #[test]
    fn test_integer_count_floors_partial_step() {
        let p = ParameterDescriptor::integer("n", 22, 250, 20).unwrap();
        assert_eq!(p.count(), 12);
    }

    #[test]
    fn test_float_count_tolerates_rounding() {
        let p = ParameterDescriptor::float("f", 0.1, 0.4, 0.1).unwrap();
        assert_eq!(p.count(), 4);
        let p = ParameterDescriptor::float("P", 0.1, 1.11, 0.2).unwrap();
        assert_eq!(p.count(), 6);
    }

    #[test]
    fn test_float_values_stay_within_max() {
        let p = ParameterDescriptor::float("f", 0.1, 0.7, 0.1).unwrap();
        assert_eq!(p.count(), 7);
        assert_eq!(p.value_at(6), Some(ParameterValue::Float(0.7)));
        let values: Vec<f64> = (0..p.count())
            .map(|i| match p.value_at(i) {
                Some(ParameterValue::Float(v)) => v,
                other => panic!("unexpected value {:?}", other),
            })
            .collect();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(values.iter().all(|v| (0.1..=0.7).contains(v)));
    }

    #[test]
    fn test_float_step_below_resolution_rejected() {
        assert!(matches!(
            ParameterDescriptor::float("x", 1e16, 1e16 + 4.0, 1.0),
            Err(SearchError::Structural(_))
        ));
        let p = ParameterDescriptor::float("x", 1e16, 1e16 + 64.0, 16.0).unwrap();
        let values: Vec<String> = (0..p.count())
            .map(|i| p.value_at(i).unwrap().to_string())
            .collect();
        let distinct: std::collections::HashSet<&String> = values.iter().collect();
        assert_eq!(distinct.len(), values.len());
    }

    #[test]
    fn test_single_value_descriptor() {
        let p = ParameterDescriptor::float("ps", 5.0, 5.0, 1.0).unwrap();
        assert_eq!(p.count(), 1);
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        assert!(ParameterDescriptor::integer("n", 10, 1, 1).is_err());
        assert!(ParameterDescriptor::integer("n", 1, 10, 0).is_err());
        assert!(ParameterDescriptor::float("f", 0.0, 1.0, -0.5).is_err());
        assert!(ParameterDescriptor::float("f", f64::NAN, 1.0, 0.5).is_err());
    }

    #[test]
    fn test_enumerated_requires_unique_values() {
        assert!(ParameterDescriptor::enumerated("side", ["long", "long"]).is_err());
        assert!(ParameterDescriptor::enumerated("side", Vec::<String>::new()).is_err());
        let p = ParameterDescriptor::enumerated("side", ["long", "short"]).unwrap();
        assert_eq!(p.count(), 2);
        assert_eq!(p.value_at(1), Some(ParameterValue::Text("short".into())));
    }

    #[test]
    fn test_sub_execution_candidates() {
        assert!(ParameterDescriptor::sub_execution("", Vec::<String>::new()).is_err());
        let p = ParameterDescriptor::sub_execution("", ["ema", "sma"]).unwrap();
        assert!(p.is_sub_execution());
        assert_eq!(p.count(), 2);
    }
}
