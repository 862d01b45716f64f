//! Point-set storage abstractions.

use ndarray::ArrayView1;

use crate::metric::Metric;
use crate::utils::DistanceValue;

mod delay;
mod matrix;

pub use delay::DelayEmbedding;
pub use matrix::MatrixSet;

/// A finite, immutable collection of points in a D-dimensional real space.
///
/// The index never copies points: it refers to them by index and reads them
/// through zero-allocation views. A point set is constructed once and never
/// mutated afterwards, so a built tree may borrow it for its whole lifetime.
pub trait PointSet<T: DistanceValue> {
    /// The number of points in the set.
    fn cardinality(&self) -> usize;

    /// The dimensionality of each point.
    fn dimensionality(&self) -> usize;

    /// A view of the `i`-th point.
    ///
    /// Implementations must not copy the underlying storage.
    fn point(&self, i: usize) -> ArrayView1<'_, T>;

    /// The distance between the `i`-th and `j`-th points.
    fn distance_between<M: Metric<T>>(&self, i: usize, j: usize, metric: &M) -> T {
        metric.distance(self.point(i), self.point(j))
    }

    /// The distance between the `i`-th point and an external query point.
    fn distance_to_query<M: Metric<T>>(&self, i: usize, query: ArrayView1<T>, metric: &M) -> T {
        metric.distance(self.point(i), query)
    }

    /// Threshold-aware form of [`distance_to_query`](Self::distance_to_query).
    fn distance_to_query_upto<M: Metric<T>>(
        &self,
        i: usize,
        query: ArrayView1<T>,
        threshold: T,
        metric: &M,
    ) -> T {
        metric.distance_upto(self.point(i), query, threshold)
    }
}
