use std::fmt::Debug;
use std::hash::Hash;

use k_nn::{KnnError, NearestNeighbors};
use num_traits::ToPrimitive;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use smote_helpers::{class_counts, DataPoint, Distance, Float};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while oversampling with SMOTE.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmoteError {
    /// k cannot be zero.
    #[error("the number of neighbors must be at least one")]
    InvalidK,
    /// Cannot resample an empty dataset.
    #[error("cannot resample an empty dataset")]
    EmptyDataSet,
    /// Oversampling needs a majority class and at least one other class.
    #[error("the dataset must contain at least two classes")]
    SingleClass,
    /// A class that needs new samples is too small for the requested k.
    #[error(
        "class {class} has {n_samples} samples, too few for {k_neighbors} neighbors \
         (at least k + 2 samples are required)"
    )]
    NotEnoughNeighbors {
        class: String,
        k_neighbors: usize,
        n_samples: usize,
    },
    /// The sampling ratio must lie in (0, 1].
    #[error("the sampling ratio must be in (0, 1]")]
    InvalidRatio,
    /// The nearest-neighbor search failed.
    #[error(transparent)]
    Neighbors(#[from] KnnError),
}

/// How many samples each non-majority class is raised to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SamplingStrategy<F> {
    /// Every class except the majority is raised to the majority count.
    #[default]
    Auto,
    /// Every class except the majority is raised to `floor(ratio * majority)`.
    Ratio(F),
}

/// Synthetic Minority Over-sampling Technique.
///
/// Each synthetic sample is placed on the segment between a randomly chosen
/// sample of the class and one of its `k_neighbors` nearest neighbors within
/// the same class.
///
/// # Type Parameters
///
/// * `F`: The float type for the features (e.g., `f32`, `f64`).
/// * `D`: The distance metric used to find neighbors.
#[derive(Debug, Clone)]
pub struct Smote<F, D>
where
    F: Float,
    D: Distance<F>,
{
    k_neighbors: usize,
    distance: D,
    strategy: SamplingStrategy<F>,
    seed: Option<u64>,
}

impl<F, D> Smote<F, D>
where
    F: Float,
    D: Distance<F>,
{
    /// Creates a sampler with the `Auto` strategy and no fixed seed.
    pub fn new(k_neighbors: usize, distance: D) -> Self {
        Self {
            k_neighbors,
            distance,
            strategy: SamplingStrategy::Auto,
            seed: None,
        }
    }

    /// Pins the random generator so `fit_resample` is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strategy(mut self, strategy: SamplingStrategy<F>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Number of samples to synthesize per class, in ascending label order.
    ///
    /// Only classes that need at least one new sample are listed.
    ///
    /// # Errors
    ///
    /// Returns `SmoteError::EmptyDataSet`, `SmoteError::SingleClass` or
    /// `SmoteError::InvalidRatio`.
    pub fn sampling_plan<L>(&self, data: &[DataPoint<L, F>]) -> Result<Vec<(L, usize)>, SmoteError>
    where
        L: Clone + Eq + Hash + Debug + Ord,
    {
        if data.is_empty() {
            return Err(SmoteError::EmptyDataSet);
        }
        let counts = class_counts(data);
        if counts.len() < 2 {
            return Err(SmoteError::SingleClass);
        }
        let (majority, majority_count) = counts.majority().ok_or(SmoteError::EmptyDataSet)?;

        let target = match self.strategy {
            SamplingStrategy::Auto => majority_count,
            SamplingStrategy::Ratio(ratio) => {
                if !ratio.is_finite() || ratio <= F::zero() || ratio > F::one() {
                    return Err(SmoteError::InvalidRatio);
                }
                let scaled = ratio * F::from_usize(majority_count).ok_or(SmoteError::InvalidRatio)?;
                scaled.floor().to_usize().ok_or(SmoteError::InvalidRatio)?
            }
        };

        Ok(counts
            .iter()
            .filter(|(label, _)| **label != majority)
            .filter_map(|(label, count)| {
                let n_new = target.saturating_sub(count);
                (n_new > 0).then(|| (label.clone(), n_new))
            })
            .collect())
    }

    /// Synthesizes new samples until every class meets its target count.
    ///
    /// Only the new samples are returned, grouped by class in ascending label
    /// order. The input is not modified.
    ///
    /// # Errors
    ///
    /// Returns `SmoteError::InvalidK` when `k_neighbors` is 0 and
    /// `SmoteError::NotEnoughNeighbors` when a class that needs samples has
    /// fewer than `k_neighbors + 2` points, besides the errors of
    /// [`Smote::sampling_plan`] and of the neighbor search.
    pub fn fit_resample<L>(&self, data: &[DataPoint<L, F>]) -> Result<Vec<DataPoint<L, F>>, SmoteError>
    where
        L: Clone + Eq + Hash + Debug + Ord,
    {
        if self.k_neighbors == 0 {
            return Err(SmoteError::InvalidK);
        }
        let plan = self.sampling_plan(data)?;

        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let mut synthetic = Vec::with_capacity(plan.iter().map(|(_, n)| n).sum());
        for (label, n_new) in plan {
            let class_data: Vec<DataPoint<L, F>> =
                data.iter().filter(|dp| dp.label == label).cloned().collect();
            debug!(class = ?label, n_samples = class_data.len(), n_new, "oversampling class");
            self.generate(&class_data, &label, n_new, &mut rng, &mut synthetic)?;
        }

        info!(
            k_neighbors = self.k_neighbors,
            n_synthetic = synthetic.len(),
            "SMOTE resampling complete"
        );
        Ok(synthetic)
    }

    fn generate<L>(
        &self,
        class_data: &[DataPoint<L, F>],
        label: &L,
        n_new: usize,
        rng: &mut Xoshiro256PlusPlus,
        out: &mut Vec<DataPoint<L, F>>,
    ) -> Result<(), SmoteError>
    where
        L: Clone + Eq + Hash + Debug + Ord,
    {
        let n_samples = class_data.len();
        if self.k_neighbors + 1 >= n_samples {
            return Err(SmoteError::NotEnoughNeighbors {
                class: format!("{label:?}"),
                k_neighbors: self.k_neighbors,
                n_samples,
            });
        }

        let mut nn = NearestNeighbors::new(self.k_neighbors, self.distance.clone())?;
        nn.fit_points(class_data)?;
        let graph = nn.kneighbors_graph()?;

        for _ in 0..n_new {
            let base = rng.random_range(0..n_samples);
            let slot = rng.random_range(0..self.k_neighbors);
            let step: F = rng.random_range(F::zero()..F::one());

            let origin = &class_data[base].features;
            let neighbor = &class_data[graph[base][slot]].features;
            let mut features = origin.clone();
            features.scaled_add(step, &(neighbor - origin));
            out.push(DataPoint::new(features, label.clone()));
        }
        Ok(())
    }
}
