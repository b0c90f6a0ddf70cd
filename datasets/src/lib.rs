//! Synthetic datasets for the oversampling demos.
//!
//! [`make_blobs`] draws labelled points from isotropic Gaussian clusters, one
//! label per cluster, with a seeded RNG so a dataset can be regenerated exactly.

use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256PlusPlus;
use smote_helpers::{DataPoint, Float};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while generating a synthetic dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// No clusters were requested.
    #[error("at least one blob is required")]
    NoBlobs,
    /// Cluster centers are empty or disagree on dimensionality.
    #[error("blob centers must all have the same, non-zero number of features")]
    MismatchedDimensions,
    /// A standard deviation was negative, NaN or infinite.
    #[error("blob {blob} has an invalid standard deviation")]
    InvalidStdDev { blob: usize },
}

/// One isotropic Gaussian cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Blob<F: Float> {
    pub center: Array1<F>,
    pub n_samples: usize,
    pub std_dev: F,
}

impl<F: Float> Blob<F> {
    pub fn new(center: Array1<F>, n_samples: usize, std_dev: F) -> Self {
        Self {
            center,
            n_samples,
            std_dev,
        }
    }
}

/// Generates `blob.n_samples` points around each blob's center.
///
/// Every coordinate is `center[d] + std_dev * z` with `z` drawn from a
/// standard normal distribution. Points are labelled with the index of their
/// blob. With `shuffle` the output order is permuted; otherwise points are
/// grouped by blob in the order given.
///
/// # Errors
///
/// Returns `DatasetError::NoBlobs` for an empty `blobs` slice,
/// `DatasetError::MismatchedDimensions` if centers are empty or of different
/// lengths and `DatasetError::InvalidStdDev` for a negative or non-finite
/// standard deviation.
pub fn make_blobs<F: Float>(
    blobs: &[Blob<F>],
    shuffle: bool,
    seed: u64,
) -> Result<Vec<DataPoint<usize, F>>, DatasetError> {
    let n_features = blobs.first().ok_or(DatasetError::NoBlobs)?.center.len();
    if n_features == 0 {
        return Err(DatasetError::MismatchedDimensions);
    }
    for (i, blob) in blobs.iter().enumerate() {
        if blob.center.len() != n_features {
            return Err(DatasetError::MismatchedDimensions);
        }
        if !blob.std_dev.is_finite() || blob.std_dev < F::zero() {
            return Err(DatasetError::InvalidStdDev { blob: i });
        }
    }

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let total: usize = blobs.iter().map(|b| b.n_samples).sum();
    let mut data = Vec::with_capacity(total);

    for (label, blob) in blobs.iter().enumerate() {
        debug!(label, n_samples = blob.n_samples, "sampling blob");
        for _ in 0..blob.n_samples {
            let features = blob.center.mapv(|c| {
                let z: f64 = rng.sample(StandardNormal);
                c + blob.std_dev * F::from_f64(z).unwrap_or_else(F::zero)
            });
            data.push(DataPoint::new(features, label));
        }
    }

    if shuffle {
        data.shuffle(&mut rng);
    }
    Ok(data)
}
