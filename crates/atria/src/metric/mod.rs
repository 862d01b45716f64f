//! Distance functions over point views.

use ndarray::ArrayView1;

use crate::utils::DistanceValue;

mod kernels;

/// A distance function between two points.
///
/// Implementations must be deterministic, symmetric, non-negative, satisfy the
/// identity of indiscernibles, and obey the triangle inequality; the search
/// engine's pruning is only correct under those properties. The property
/// predicates below let callers assert what a metric claims about itself.
///
/// Points are passed as [`ArrayView1`]s so that strided views (e.g. points of
/// a time-delay embedding) cost nothing to hand over.
pub trait Metric<T: DistanceValue>: Send + Sync {
    /// Returns a name for the metric.
    fn name(&self) -> &'static str;

    /// Returns the distance between `x` and `y`.
    fn distance(&self, x: ArrayView1<T>, y: ArrayView1<T>) -> T;

    /// Threshold-aware form of [`distance`](Self::distance).
    ///
    /// Once the partial result provably exceeds `threshold`, implementations
    /// may return any value strictly greater than `threshold` instead of
    /// finishing the computation. The default simply computes the exact
    /// distance.
    fn distance_upto(&self, x: ArrayView1<T>, y: ArrayView1<T>, threshold: T) -> T {
        let _ = threshold;
        self.distance(x, y)
    }

    /// Whether `distance(x, y) == 0` implies `x == y`.
    fn has_identity(&self) -> bool {
        true
    }

    /// Whether the metric is symmetric.
    fn has_symmetry(&self) -> bool {
        true
    }

    /// Whether the metric obeys the triangle inequality.
    fn obeys_triangle_inequality(&self) -> bool {
        true
    }
}

/// The Euclidean (L2) metric.
pub struct Euclidean;

impl<T: DistanceValue + distances::number::Float> Metric<T> for Euclidean {
    fn name(&self) -> &'static str {
        "euclidean"
    }

    fn distance(&self, x: ArrayView1<T>, y: ArrayView1<T>) -> T {
        match (x.as_slice(), y.as_slice()) {
            (Some(x), Some(y)) => kernels::euclidean(x, y),
            _ => kernels::euclidean_strided(x, y),
        }
    }

    fn distance_upto(&self, x: ArrayView1<T>, y: ArrayView1<T>, threshold: T) -> T {
        kernels::euclidean_upto(x, y, threshold)
    }
}

/// The Chebyshev (L-infinity) metric.
pub struct Chebyshev;

impl<T: DistanceValue + distances::number::Float> Metric<T> for Chebyshev {
    fn name(&self) -> &'static str {
        "chebyshev"
    }

    fn distance(&self, x: ArrayView1<T>, y: ArrayView1<T>) -> T {
        match (x.as_slice(), y.as_slice()) {
            (Some(x), Some(y)) => kernels::chebyshev(x, y),
            _ => kernels::chebyshev_strided(x, y),
        }
    }

    fn distance_upto(&self, x: ArrayView1<T>, y: ArrayView1<T>, threshold: T) -> T {
        kernels::chebyshev_upto(x, y, threshold)
    }
}

/// The Manhattan (L1) metric.
pub struct Manhattan;

impl<T: DistanceValue + distances::number::Float> Metric<T> for Manhattan {
    fn name(&self) -> &'static str {
        "manhattan"
    }

    fn distance(&self, x: ArrayView1<T>, y: ArrayView1<T>) -> T {
        match (x.as_slice(), y.as_slice()) {
            (Some(x), Some(y)) => kernels::manhattan(x, y),
            _ => kernels::manhattan_strided(x, y),
        }
    }

    fn distance_upto(&self, x: ArrayView1<T>, y: ArrayView1<T>, threshold: T) -> T {
        kernels::manhattan_upto(x, y, threshold)
    }
}
