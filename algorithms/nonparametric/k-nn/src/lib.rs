use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use ndarray::{Array2, ArrayView1};
use smote_helpers::{DataPoint, Distance, Float};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when building or querying a nearest-neighbor index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnnError {
    /// The number of neighbors must be at least one.
    #[error("the number of neighbors must be at least one")]
    InvalidK,
    /// The index was fitted on an empty set of samples.
    #[error("cannot fit a nearest-neighbor index on an empty set of samples")]
    EmptyTrainingSet,
    /// Fewer candidate samples than requested neighbors.
    #[error("requested {n_neighbors} neighbors but only {n_samples} candidate samples are available")]
    NotEnoughSamples { n_neighbors: usize, n_samples: usize },
    /// Samples or query vectors disagree on the number of features.
    #[error("samples and queries must all have the same number of features")]
    MismatchedDimensions,
    /// A distance evaluated to NaN.
    #[error("invalid distance comparison (likely due to NaN values in data)")]
    InvalidDistance,
    /// The index has not been fitted yet.
    #[error("the nearest-neighbor index has not been fitted")]
    NotFitted,
}

/// One result of a neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<F> {
    /// Row of the neighbor in the fitted samples.
    pub index: usize,
    /// True distance from the query to the neighbor.
    pub distance: F,
}

/// A brute-force k-nearest-neighbor index.
///
/// Samples are stored as the rows of an `Array2`. Queries rank every sample by
/// the metric's reduced distance and keep the `n_neighbors` closest, breaking
/// ties by row index so results are deterministic.
///
/// # Type Parameters
///
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
/// * `D`: The distance metric, which must implement `Distance<F>`.
#[derive(Debug, Clone)]
pub struct NearestNeighbors<F, D>
where
    F: Float,
    D: Distance<F>,
{
    n_neighbors: usize,
    distance: D,
    samples: Option<Array2<F>>,
}

impl<F, D> NearestNeighbors<F, D>
where
    F: Float,
    D: Distance<F>,
{
    /// Creates an unfitted index returning `n_neighbors` neighbors per query.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::InvalidK` if `n_neighbors` is 0.
    pub fn new(n_neighbors: usize, distance: D) -> Result<Self, KnnError> {
        if n_neighbors == 0 {
            return Err(KnnError::InvalidK);
        }
        Ok(Self {
            n_neighbors,
            distance,
            samples: None,
        })
    }

    /// Number of fitted samples, 0 before `fit`.
    pub fn n_samples(&self) -> usize {
        self.samples.as_ref().map_or(0, |s| s.nrows())
    }

    /// Fits the index on the rows of `samples`.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::EmptyTrainingSet` if there are no rows or no columns.
    pub fn fit(&mut self, samples: Array2<F>) -> Result<(), KnnError> {
        if samples.nrows() == 0 || samples.ncols() == 0 {
            return Err(KnnError::EmptyTrainingSet);
        }
        self.samples = Some(samples);
        Ok(())
    }

    /// Fits the index on the feature vectors of `points`, ignoring labels.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::EmptyTrainingSet` for an empty slice and
    /// `KnnError::MismatchedDimensions` if the points differ in length.
    pub fn fit_points<L>(&mut self, points: &[DataPoint<L, F>]) -> Result<(), KnnError>
    where
        L: Clone + Eq + Hash + Debug,
    {
        let n_features = points.first().ok_or(KnnError::EmptyTrainingSet)?.features.len();
        let mut samples = Array2::zeros((points.len(), n_features));
        for (mut row, dp) in samples.rows_mut().into_iter().zip(points) {
            if dp.features.len() != n_features {
                return Err(KnnError::MismatchedDimensions);
            }
            row.assign(&dp.features);
        }
        self.fit(samples)
    }

    /// Returns the fitted sample at row `index`.
    pub fn sample(&self, index: usize) -> Option<ArrayView1<F>> {
        let samples = self.samples.as_ref()?;
        (index < samples.nrows()).then(|| samples.row(index))
    }

    /// Finds the `n_neighbors` samples closest to `query`, nearest first.
    ///
    /// `exclude` removes one row from the candidates, which is how a fitted
    /// sample is queried against the others.
    ///
    /// # Errors
    ///
    /// Returns `KnnError::NotFitted` before `fit`, `KnnError::MismatchedDimensions`
    /// for a query of the wrong length, `KnnError::NotEnoughSamples` when fewer
    /// candidates than neighbors remain, and `KnnError::InvalidDistance` if a
    /// distance is NaN.
    pub fn kneighbors(
        &self,
        query: ArrayView1<F>,
        exclude: Option<usize>,
    ) -> Result<Vec<Neighbor<F>>, KnnError> {
        let samples = self.samples.as_ref().ok_or(KnnError::NotFitted)?;
        if query.len() != samples.ncols() {
            return Err(KnnError::MismatchedDimensions);
        }

        let excluded = exclude.filter(|&i| i < samples.nrows());
        let n_candidates = samples.nrows() - usize::from(excluded.is_some());
        if self.n_neighbors > n_candidates {
            return Err(KnnError::NotEnoughSamples {
                n_neighbors: self.n_neighbors,
                n_samples: n_candidates,
            });
        }

        let mut ranked: Vec<(F, usize)> = Vec::with_capacity(n_candidates);
        for (i, row) in samples.rows().into_iter().enumerate() {
            if Some(i) == excluded {
                continue;
            }
            let rdist = self.distance.rdistance(row, query);
            if rdist.is_nan() {
                return Err(KnnError::InvalidDistance);
            }
            ranked.push((rdist, i));
        }

        // No NaNs are left, so `partial_cmp` always succeeds.
        ranked.sort_unstable_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        ranked.truncate(self.n_neighbors);

        Ok(ranked
            .into_iter()
            .map(|(rdist, index)| Neighbor {
                index,
                distance: self.distance.rdist_to_dist(rdist),
            })
            .collect())
    }

    /// Neighbor indices of every fitted sample among the other samples.
    ///
    /// Row `i` of the result lists the `n_neighbors` nearest rows to sample `i`,
    /// nearest first, never including `i` itself.
    ///
    /// # Errors
    ///
    /// Same as [`NearestNeighbors::kneighbors`].
    pub fn kneighbors_graph(&self) -> Result<Vec<Vec<usize>>, KnnError> {
        let samples = self.samples.as_ref().ok_or(KnnError::NotFitted)?;
        debug!(
            n_samples = samples.nrows(),
            n_neighbors = self.n_neighbors,
            "building k-nearest-neighbor graph"
        );
        samples
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                self.kneighbors(row, Some(i))
                    .map(|neighbors| neighbors.into_iter().map(|n| n.index).collect())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use rstest::rstest;
    use smote_helpers::{L1Dist, L2Dist, LInfDist};

    fn line() -> Array2<f64> {
        array![[0.0, 0.0], [1.0, 0.0], [3.0, 0.0], [6.0, 0.0], [10.0, 0.0]]
    }

    #[test]
    fn test_kneighbors_simple() {
        let mut nn = NearestNeighbors::new(2, L2Dist).unwrap();
        nn.fit(line()).unwrap();

        let found = nn.kneighbors(array![2.8, 0.0].view(), None).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].index, 2);
        assert_eq!(found[1].index, 1);
        assert_abs_diff_eq!(found[0].distance, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(found[1].distance, 1.8, epsilon = 1e-12);
    }

    #[test]
    fn test_kneighbors_excludes_self() {
        let mut nn = NearestNeighbors::new(1, L2Dist).unwrap();
        nn.fit(line()).unwrap();

        let found = nn.kneighbors(nn.sample(3).unwrap(), Some(3)).unwrap();
        assert_eq!(found[0].index, 2);
    }

    #[test]
    fn test_ties_break_by_index() {
        let mut nn = NearestNeighbors::new(2, L1Dist).unwrap();
        nn.fit(array![[1.0, 0.0], [-1.0, 0.0], [0.0, 1.0], [0.0, -1.0]])
            .unwrap();

        let found = nn.kneighbors(array![0.0, 0.0].view(), None).unwrap();
        assert_eq!(found.iter().map(|n| n.index).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_graph() {
        let mut nn = NearestNeighbors::new(2, L2Dist).unwrap();
        nn.fit(line()).unwrap();

        let graph = nn.kneighbors_graph().unwrap();
        assert_eq!(
            graph,
            vec![vec![1, 2], vec![0, 2], vec![1, 0], vec![2, 4], vec![3, 2]]
        );
        for (i, row) in graph.iter().enumerate() {
            assert!(!row.contains(&i));
        }
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(7)]
    fn test_graph_matches_brute_force(#[case] k: usize) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let samples = Array2::from_shape_fn((30, 2), |_| rng.random_range(-5.0..5.0));
        let mut nn = NearestNeighbors::new(k, LInfDist).unwrap();
        nn.fit(samples.clone()).unwrap();

        let graph = nn.kneighbors_graph().unwrap();
        for (i, neighbors) in graph.iter().enumerate() {
            assert_eq!(neighbors.len(), k);
            let kth = LInfDist.distance(samples.row(i), samples.row(neighbors[k - 1]));
            let closer = (0..samples.nrows())
                .filter(|&j| j != i)
                .filter(|&j| LInfDist.distance(samples.row(i), samples.row(j)) < kth)
                .count();
            assert!(closer < k);
        }
    }

    #[test]
    fn test_fit_points() {
        let points = vec![
            DataPoint::new(array![0.0, 0.0], "A"),
            DataPoint::new(array![5.0, 5.0], "B"),
        ];
        let mut nn = NearestNeighbors::new(1, L2Dist).unwrap();
        nn.fit_points(&points).unwrap();
        assert_eq!(nn.n_samples(), 2);
        assert_eq!(nn.sample(1).unwrap(), array![5.0, 5.0].view());
        assert!(nn.sample(2).is_none());
    }

    #[test]
    fn test_error_on_k_zero() {
        let result = NearestNeighbors::<f64, _>::new(0, L2Dist);
        assert!(matches!(result, Err(KnnError::InvalidK)));
    }

    #[test]
    fn test_error_on_empty_training_set() {
        let mut nn = NearestNeighbors::new(1, L2Dist).unwrap();
        assert_eq!(nn.fit(Array2::<f64>::zeros((0, 2))), Err(KnnError::EmptyTrainingSet));
        let empty: Vec<DataPoint<&str, f64>> = vec![];
        assert_eq!(nn.fit_points(&empty), Err(KnnError::EmptyTrainingSet));
    }

    #[test]
    fn test_error_on_not_fitted() {
        let nn = NearestNeighbors::new(1, L2Dist).unwrap();
        assert_eq!(
            nn.kneighbors(array![0.0, 0.0].view(), None),
            Err(KnnError::NotFitted)
        );
        assert_eq!(nn.kneighbors_graph(), Err(KnnError::NotFitted));
    }

    #[test]
    fn test_error_on_not_enough_samples() {
        let mut nn = NearestNeighbors::new(5, L2Dist).unwrap();
        nn.fit(line()).unwrap();
        assert!(nn.kneighbors(array![0.0, 0.0].view(), None).is_ok());
        assert_eq!(
            nn.kneighbors(array![0.0, 0.0].view(), Some(0)),
            Err(KnnError::NotEnoughSamples {
                n_neighbors: 5,
                n_samples: 4
            })
        );
    }

    #[test]
    fn test_error_on_mismatched_dimensions() {
        let mut nn = NearestNeighbors::new(1, L2Dist).unwrap();
        nn.fit(line()).unwrap();
        assert_eq!(
            nn.kneighbors(array![0.0].view(), None),
            Err(KnnError::MismatchedDimensions)
        );

        let bad = vec![
            DataPoint::new(array![1.0, 2.0], ()),
            DataPoint::new(array![3.0], ()),
        ];
        assert_eq!(nn.fit_points(&bad), Err(KnnError::MismatchedDimensions));
    }

    #[test]
    fn test_error_on_nan() {
        let mut nn = NearestNeighbors::new(1, L2Dist).unwrap();
        nn.fit(array![[0.0, f64::NAN], [1.0, 1.0]]).unwrap();
        assert_eq!(
            nn.kneighbors(array![0.0, 0.0].view(), None),
            Err(KnnError::InvalidDistance)
        );
    }
}
