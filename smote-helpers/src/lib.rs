use ndarray::NdFloat;

use num_traits::FromPrimitive;
use rand::distr::uniform::SampleUniform;

mod common;
mod distance;
pub mod logging;

// Re-export types from submodules
pub use common::{class_counts, ClassCounts, DataPoint};
pub use distance::{Distance, L1Dist, L2Dist, LInfDist};

/// Floating-point feature type shared by the neighbor search, the generator
/// and SMOTE.
pub trait Float: NdFloat + FromPrimitive + SampleUniform {}

impl Float for f32 {}

impl Float for f64 {}
