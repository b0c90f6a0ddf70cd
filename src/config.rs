//! Fixed parameters of the SMOTE demo.
//!
//! Nothing is read from flags or files; `DemoConfig::default()` holds the
//! values both binaries run with.

use std::ops::RangeInclusive;

use datasets::{make_blobs, Blob, DatasetError};
use ndarray::array;
use smote::SamplingStrategy;
use smote_helpers::DataPoint;
use thiserror::Error;
use tracing::warn;

use crate::metric::DistanceMetric;

/// Errors raised while validating the demo configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("neighbor range {start}..={end} is empty or starts at zero")]
    InvalidNeighborRange { start: usize, end: usize },
    #[error("minority class has {minority_count} samples; SMOTE needs at least 3")]
    MinorityTooSmall { minority_count: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// One blob per class; the blob index is the class label.
    pub blobs: Vec<Blob<f64>>,
    pub dataset_seed: u64,
    pub shuffle: bool,
    pub initial_neighbors: usize,
    pub neighbor_range: RangeInclusive<usize>,
    /// `None` draws a fresh sampler seed on every update.
    pub resample_seed: Option<u64>,
    pub strategy: SamplingStrategy<f64>,
    pub metric: DistanceMetric,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            blobs: vec![
                Blob::new(array![1.0, 1.0], 20, 2.5),
                Blob::new(array![4.0, 4.0], 200, 1.0),
            ],
            dataset_seed: 14,
            shuffle: true,
            initial_neighbors: 5,
            neighbor_range: 1..=15,
            resample_seed: None,
            strategy: SamplingStrategy::Auto,
            metric: DistanceMetric::L2,
        }
    }
}

impl DemoConfig {
    pub fn generate_dataset(&self) -> Result<Vec<DataPoint<usize, f64>>, DatasetError> {
        make_blobs(&self.blobs, self.shuffle, self.dataset_seed)
    }

    /// The slider range, narrowed so every value is valid for a minority
    /// class of `minority_count` samples (k must stay below `count - 1`).
    pub fn neighbor_range(&self, minority_count: usize) -> Result<RangeInclusive<usize>, ConfigError> {
        let (start, end) = (*self.neighbor_range.start(), *self.neighbor_range.end());
        if start == 0 || start > end {
            return Err(ConfigError::InvalidNeighborRange { start, end });
        }
        if minority_count < 3 {
            return Err(ConfigError::MinorityTooSmall { minority_count });
        }

        let max_valid = minority_count - 2;
        if end <= max_valid {
            return Ok(start..=end);
        }
        if start > max_valid {
            return Err(ConfigError::InvalidNeighborRange { start, end: max_valid });
        }
        warn!(
            configured = end,
            clamped = max_valid,
            minority_count,
            "neighbor range exceeds what the minority class supports; clamping"
        );
        Ok(start..=max_valid)
    }

    /// The starting slider value, clamped into `range`.
    pub fn initial_neighbors_in(&self, range: &RangeInclusive<usize>) -> usize {
        self.initial_neighbors.clamp(*range.start(), *range.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use smote_helpers::class_counts;

    #[test]
    fn test_default_dataset() {
        let config = DemoConfig::default();
        let data = config.generate_dataset().unwrap();
        let counts = class_counts(&data);
        assert_eq!(counts.get(&0), 20);
        assert_eq!(counts.get(&1), 200);
        assert_eq!(counts.minority(), Some((0, 20)));
        assert_eq!(data, config.generate_dataset().unwrap());
    }

    #[test]
    fn test_default_range_is_untouched() {
        let config = DemoConfig::default();
        assert_eq!(config.neighbor_range(20).unwrap(), 1..=15);
        assert_eq!(config.initial_neighbors_in(&(1..=15)), 5);
    }

    #[rstest]
    #[case(10, 1..=8)]
    #[case(17, 1..=15)]
    #[case(3, 1..=1)]
    fn test_range_is_clamped(#[case] minority_count: usize, #[case] expected: RangeInclusive<usize>) {
        let config = DemoConfig::default();
        assert_eq!(config.neighbor_range(minority_count).unwrap(), expected);
    }

    #[test]
    fn test_initial_value_follows_clamp() {
        let config = DemoConfig {
            initial_neighbors: 12,
            ..DemoConfig::default()
        };
        let range = config.neighbor_range(10).unwrap();
        assert_eq!(config.initial_neighbors_in(&range), 8);
    }

    #[test]
    fn test_range_errors() {
        let config = DemoConfig::default();
        assert_eq!(
            config.neighbor_range(2),
            Err(ConfigError::MinorityTooSmall { minority_count: 2 })
        );

        let zero = DemoConfig {
            neighbor_range: 0..=3,
            ..DemoConfig::default()
        };
        assert_eq!(
            zero.neighbor_range(20),
            Err(ConfigError::InvalidNeighborRange { start: 0, end: 3 })
        );

        let high = DemoConfig {
            neighbor_range: 10..=15,
            ..DemoConfig::default()
        };
        assert_eq!(
            high.neighbor_range(8),
            Err(ConfigError::InvalidNeighborRange { start: 10, end: 6 })
        );
    }
}
