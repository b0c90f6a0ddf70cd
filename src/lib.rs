//! Oversampling playground: synthetic blobs, a nearest-neighbor index and
//! SMOTE, plus the fixed configuration shared by the demo binaries.

pub mod config;
pub mod metric;

pub use config::{ConfigError, DemoConfig};
pub use metric::DistanceMetric;

pub use datasets::{make_blobs, Blob, DatasetError};
pub use k_nn::{KnnError, Neighbor, NearestNeighbors};
pub use smote::{SamplingStrategy, Smote, SmoteError};
pub use smote_helpers::{
    class_counts, logging, ClassCounts, DataPoint, Distance, Float, L1Dist, L2Dist, LInfDist,
};
