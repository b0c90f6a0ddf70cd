use ndarray::{ArrayView1, Zip};

use crate::Float;

/// A distance function between two feature vectors.
///
/// `rdistance` is a "reduced" distance that preserves ordering but may be
/// cheaper to compute (e.g. squared Euclidean). Neighbor searches rank by
/// `rdistance` and convert back with `rdist_to_dist` only when needed.
pub trait Distance<F: Float>: Clone + Send + Sync {
    /// Computes the true distance between `a` and `b`.
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;

    /// Computes the reduced distance between `a` and `b`.
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.distance(a, b)
    }

    /// Converts a reduced distance back into a true distance.
    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }
}

/// Manhattan distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L1Dist;

impl<F: Float> Distance<F> for L1Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &x, &y| acc + (x - y).abs())
    }
}

/// Euclidean distance. The reduced distance is the squared distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a).and(&b).fold(F::zero(), |acc, &x, &y| {
            let d = x - y;
            acc + d * d
        })
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }
}

/// Chebyshev (L-infinity) distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LInfDist;

impl<F: Float> Distance<F> for LInfDist {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        Zip::from(&a)
            .and(&b)
            .fold(F::zero(), |acc, &x, &y| acc.max((x - y).abs()))
    }
}
