use super::genome::{Configuration, StageGenes};
use crate::engines::space::ConfigurationSpace;
use crate::error::{Result, SearchError};
use std::sync::Arc;

/// Deterministic odometer over every configuration of a space.
///
/// Digits are laid out stage by stage in declaration order, parameters before
/// sub-execution slots. Digit 0 (the first stage's first gene) varies fastest.
pub struct GridEnumerator {
    space: Arc<ConfigurationSpace>,
    radices: Vec<u64>,
    counter: Vec<u64>,
    size: u64,
    position: u64,
    finished: bool,
}

impl GridEnumerator {
    pub fn new(space: Arc<ConfigurationSpace>) -> Result<Self> {
        let radices: Vec<u64> = space
            .stages()
            .iter()
            .flat_map(|stage| {
                stage
                    .parameters()
                    .iter()
                    .map(|p| p.count())
                    .chain(stage.sub_executions().iter().map(|s| s.count()))
            })
            .collect();

        let size = radices
            .iter()
            .try_fold(1u64, |acc, &radix| acc.checked_mul(radix))
            .ok_or(SearchError::EnumerationOverflow {
                stages: space.len(),
            })?;

        log::debug!(
            "Grid over {} stages: {} digits, {} configurations",
            space.len(),
            radices.len(),
            size
        );

        Ok(Self {
            counter: vec![0; radices.len()],
            space,
            radices,
            size,
            position: 0,
            finished: false,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Index of the configuration the next call yields
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn space(&self) -> &Arc<ConfigurationSpace> {
        &self.space
    }

    /// Yield the current configuration and advance, or `None` once exhausted
    pub fn next_configuration(&mut self) -> Option<Configuration> {
        if self.finished {
            return None;
        }
        let configuration = self.decode(&self.counter);
        self.advance();
        Some(configuration)
    }

    /// Position the odometer so the next configuration is the one at `index`.
    /// Seeking to `size()` leaves the enumerator finished.
    pub fn seek(&mut self, index: u64) -> Result<()> {
        if index > self.size {
            return Err(SearchError::Configuration(format!(
                "grid index {} is beyond size {}",
                index, self.size
            )));
        }
        if index == self.size {
            self.counter.iter_mut().for_each(|d| *d = 0);
            self.position = self.size;
            self.finished = true;
            return Ok(());
        }
        self.counter = self.digits_of(index);
        self.position = index;
        self.finished = false;
        Ok(())
    }

    /// Decode the configuration at `index` without moving the odometer
    pub fn configuration_at(&self, index: u64) -> Result<Configuration> {
        if index >= self.size {
            return Err(SearchError::Configuration(format!(
                "grid index {} is beyond size {}",
                index, self.size
            )));
        }
        Ok(self.decode(&self.digits_of(index)))
    }

    fn digits_of(&self, mut index: u64) -> Vec<u64> {
        self.radices
            .iter()
            .map(|&radix| {
                let digit = index % radix;
                index /= radix;
                digit
            })
            .collect()
    }

    fn advance(&mut self) {
        self.position += 1;
        for (digit, &radix) in self.counter.iter_mut().zip(&self.radices) {
            *digit += 1;
            if *digit < radix {
                return;
            }
            *digit = 0;
        }
        // carried out of the most significant digit
        self.finished = true;
    }

    fn decode(&self, digits: &[u64]) -> Configuration {
        let mut digits = digits.iter().copied();
        let genes = self
            .space
            .stages()
            .iter()
            .map(|stage| StageGenes {
                parameters: digits.by_ref().take(stage.parameters().len()).collect(),
                sub_executions: digits
                    .by_ref()
                    .take(stage.sub_executions().len())
                    .map(|d| d as usize)
                    .collect(),
            })
            .collect();
        Configuration::from_genes(Arc::clone(&self.space), genes)
    }
}

impl Iterator for GridEnumerator {
    type Item = Configuration;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_configuration()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size.saturating_sub(self.position);
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}
