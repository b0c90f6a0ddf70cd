use std::fmt::{Display, Formatter};

use smote::{SamplingStrategy, Smote, SmoteError};
use smote_helpers::{DataPoint, L1Dist, L2Dist, LInfDist};

/// Distance metric selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    L1,
    #[default]
    L2,
    LInf,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 3] = [DistanceMetric::L1, DistanceMetric::L2, DistanceMetric::LInf];

    /// Longer name for selectors, e.g. "L2 (Euclidean)".
    pub fn description(&self) -> &'static str {
        match self {
            DistanceMetric::L1 => "L1 (Manhattan)",
            DistanceMetric::L2 => "L2 (Euclidean)",
            DistanceMetric::LInf => "L-Infinity",
        }
    }

    /// Runs SMOTE with this metric and returns only the synthesized points.
    pub fn resample(
        &self,
        data: &[DataPoint<usize, f64>],
        k_neighbors: usize,
        strategy: SamplingStrategy<f64>,
        seed: Option<u64>,
    ) -> Result<Vec<DataPoint<usize, f64>>, SmoteError> {
        match self {
            DistanceMetric::L1 => build(Smote::new(k_neighbors, L1Dist), strategy, seed).fit_resample(data),
            DistanceMetric::L2 => build(Smote::new(k_neighbors, L2Dist), strategy, seed).fit_resample(data),
            DistanceMetric::LInf => build(Smote::new(k_neighbors, LInfDist), strategy, seed).fit_resample(data),
        }
    }
}

fn build<D>(smote: Smote<f64, D>, strategy: SamplingStrategy<f64>, seed: Option<u64>) -> Smote<f64, D>
where
    D: smote_helpers::Distance<f64>,
{
    let smote = smote.with_strategy(strategy);
    match seed {
        Some(seed) => smote.with_seed(seed),
        None => smote,
    }
}

impl Display for DistanceMetric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceMetric::L1 => write!(f, "L1"),
            DistanceMetric::L2 => write!(f, "L2"),
            DistanceMetric::LInf => write!(f, "L-Infinity"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn tiny() -> Vec<DataPoint<usize, f64>> {
        vec![
            DataPoint::new(array![0.0, 0.0], 0),
            DataPoint::new(array![1.0, 0.0], 0),
            DataPoint::new(array![0.0, 1.0], 0),
            DataPoint::new(array![5.0, 5.0], 1),
            DataPoint::new(array![5.0, 6.0], 1),
            DataPoint::new(array![6.0, 5.0], 1),
            DataPoint::new(array![6.0, 6.0], 1),
            DataPoint::new(array![5.5, 5.5], 1),
        ]
    }

    #[test]
    fn test_every_metric_balances() {
        for metric in DistanceMetric::ALL {
            let synthetic = metric
                .resample(&tiny(), 1, SamplingStrategy::Auto, Some(4))
                .unwrap();
            assert_eq!(synthetic.len(), 2, "{metric}");
        }
    }

    #[test]
    fn test_seed_is_forwarded() {
        let a = DistanceMetric::L2.resample(&tiny(), 1, SamplingStrategy::Auto, Some(8));
        let b = DistanceMetric::L2.resample(&tiny(), 1, SamplingStrategy::Auto, Some(8));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display() {
        assert_eq!(DistanceMetric::default(), DistanceMetric::L2);
        assert_eq!(DistanceMetric::LInf.to_string(), "L-Infinity");
        assert_eq!(DistanceMetric::L1.description(), "L1 (Manhattan)");
    }
}
