//! The clustering tree: construction options, the tree itself, and
//! introspection.

use ndarray::ArrayView1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dataset::PointSet;
use crate::metric::Metric;
use crate::search::{self, KnnOptions, RnnOptions, SearchStats};
use crate::utils::DistanceValue;

mod build;
mod cluster;

pub use cluster::Cluster;

pub(crate) use build::ROOT;

/// Configuration for tree construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Slices of at most this many points are not subdivided further.
    pub min_points: usize,
    /// Seed for the root-center choice; construction is deterministic for a
    /// fixed seed.
    pub seed: Option<u64>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            min_points: 64,
            seed: None,
        }
    }
}

impl BuildOptions {
    /// Sets the leaf-size bound.
    #[must_use]
    pub const fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    /// Sets the construction seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// A farthest-point clustering tree over a borrowed point set, answering
/// k-nearest-neighbor, range, and range-count queries.
///
/// The tree owns a permutation table with one `(point index, distance)` entry
/// per point; every cluster covers a contiguous slice of it, and an entry's
/// distance is measured against the center of the deepest cluster whose slice
/// contains its position. The table is mutated only during construction;
/// a built tree is read-only and may be shared across threads.
///
/// # Examples
///
/// ```
/// use atria::{BuildOptions, Euclidean, KnnOptions, MatrixSet, Tree};
///
/// let points = MatrixSet::from_rows(vec![
///     vec![0.0_f64, 0.0],
///     vec![3.0, 4.0],
///     vec![1.0, 1.0],
///     vec![5.0, 0.0],
/// ])?;
/// let tree = Tree::new(&points, Euclidean, &BuildOptions::default())?;
///
/// let hits = tree.knn(&[0.0, 0.0], 2, &KnnOptions::default())?;
/// assert_eq!(hits[0], (0, 0.0));
/// assert_eq!(hits[1].0, 2);
/// # Ok::<(), String>(())
/// ```
pub struct Tree<'a, P, M, T: DistanceValue> {
    /// The point set being indexed; shared and immutable.
    pub(crate) data: &'a P,
    /// The metric all distances are measured with.
    pub(crate) metric: M,
    /// The permutation table.
    pub(crate) permutation: Vec<(usize, T)>,
    /// The cluster arena; the root is at index [`ROOT`].
    pub(crate) clusters: Vec<Cluster<T>>,
    /// The number of levels in the tree.
    depth: usize,
}

impl<'a, P: PointSet<T>, M: Metric<T>, T: DistanceValue> Tree<'a, P, M, T> {
    /// Builds a tree over `data` with the given metric and options.
    ///
    /// # Errors
    ///
    /// - If the point set is empty.
    /// - If `min_points` is zero.
    pub fn new(data: &'a P, metric: M, options: &BuildOptions) -> Result<Self, String> {
        if data.cardinality() == 0 {
            return Err("Cannot build a tree over an empty point set".to_string());
        }
        if options.min_points == 0 {
            return Err("min_points must be at least 1".to_string());
        }

        let (permutation, clusters, depth) =
            build::Builder::new(data, &metric, options.min_points).build(options.seed);
        let tree = Self {
            data,
            metric,
            permutation,
            clusters,
            depth,
        };
        log::debug!(
            "Built a tree over {} points with metric {}: {} clusters, {} leaves, depth {}",
            tree.cardinality(),
            tree.metric.name(),
            tree.cluster_count(),
            tree.leaf_count(),
            tree.depth(),
        );
        Ok(tree)
    }

    /// The point set this tree indexes.
    #[must_use]
    pub const fn data(&self) -> &'a P {
        self.data
    }

    /// The metric this tree measures distances with.
    #[must_use]
    pub const fn metric(&self) -> &M {
        &self.metric
    }

    /// The number of indexed points.
    #[must_use]
    pub fn cardinality(&self) -> usize {
        self.data.cardinality()
    }

    /// The dimensionality of the indexed points.
    #[must_use]
    pub fn dimensionality(&self) -> usize {
        self.data.dimensionality()
    }

    /// The permutation table.
    #[must_use]
    pub fn permutation(&self) -> &[(usize, T)] {
        &self.permutation
    }

    /// All clusters of the tree; the root is first.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster<T>] {
        &self.clusters
    }

    /// The root cluster.
    #[must_use]
    pub fn root(&self) -> &Cluster<T> {
        &self.clusters[ROOT]
    }

    /// The permutation-table slice owned by a cluster.
    #[must_use]
    pub fn slice_of(&self, cluster: &Cluster<T>) -> &[(usize, T)] {
        &self.permutation[cluster.span()]
    }

    /// The number of levels in the tree.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// The number of clusters in the tree.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// The number of leaf clusters in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.clusters.iter().filter(|c| c.is_leaf()).count()
    }

    /// The mean cardinality (center included) of the leaf clusters.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn mean_leaf_size(&self) -> f64 {
        let (count, total) = self
            .clusters
            .iter()
            .filter(|c| c.is_leaf())
            .fold((0_usize, 0_usize), |(count, total), c| {
                (count + 1, total + c.cardinality())
            });
        total as f64 / count as f64
    }

    /// Returns the `k` nearest neighbors of `query` as `(index, distance)`
    /// pairs, sorted ascending by distance (ties by index).
    ///
    /// # Errors
    ///
    /// - If `k` is zero.
    /// - If `epsilon` is negative or NaN.
    pub fn knn(
        &self,
        query: &[T],
        k: usize,
        options: &KnnOptions<T>,
    ) -> Result<Vec<(usize, T)>, String> {
        self.knn_with_stats(query, k, options).map(|(hits, _)| hits)
    }

    /// Like [`knn`](Self::knn), but also returns counters describing the work
    /// the query performed.
    ///
    /// # Errors
    ///
    /// - See [`knn`](Self::knn).
    pub fn knn_with_stats(
        &self,
        query: &[T],
        k: usize,
        options: &KnnOptions<T>,
    ) -> Result<(Vec<(usize, T)>, SearchStats), String> {
        if k == 0 {
            return Err("k must be at least 1".to_string());
        }
        if !(options.epsilon >= T::zero()) {
            return Err("epsilon must be non-negative".to_string());
        }
        Ok(search::knn::search(self, ArrayView1::from(query), k, options))
    }

    /// Runs [`knn`](Self::knn) for each query in order.
    ///
    /// # Errors
    ///
    /// - See [`knn`](Self::knn).
    pub fn batch_knn(
        &self,
        queries: &[Vec<T>],
        k: usize,
        options: &KnnOptions<T>,
    ) -> Result<Vec<Vec<(usize, T)>>, String> {
        queries.iter().map(|q| self.knn(q, k, options)).collect()
    }

    /// Returns all points within `radius` of `query` as `(index, distance)`
    /// pairs, sorted ascending by distance (ties by index).
    #[must_use]
    pub fn rnn(&self, query: &[T], radius: T, options: &RnnOptions) -> Vec<(usize, T)> {
        self.rnn_with_stats(query, radius, options).0
    }

    /// Like [`rnn`](Self::rnn), but also returns counters describing the work
    /// the query performed.
    #[must_use]
    pub fn rnn_with_stats(
        &self,
        query: &[T],
        radius: T,
        options: &RnnOptions,
    ) -> (Vec<(usize, T)>, SearchStats) {
        search::rnn::search(self, ArrayView1::from(query), radius, options)
    }

    /// Counts the points within `radius` of `query` without collecting them.
    #[must_use]
    pub fn rnn_count(&self, query: &[T], radius: T, options: &RnnOptions) -> usize {
        search::rnn::count(self, ArrayView1::from(query), radius, options)
    }

    /// Runs [`rnn`](Self::rnn) for each query in order.
    #[must_use]
    pub fn batch_rnn(&self, queries: &[Vec<T>], radius: T, options: &RnnOptions) -> Vec<Vec<(usize, T)>> {
        queries.iter().map(|q| self.rnn(q, radius, options)).collect()
    }

    /// Exhaustive k-nearest-neighbor scan, bypassing the tree. Intended as a
    /// correctness baseline.
    ///
    /// # Errors
    ///
    /// - If `k` is zero.
    pub fn linear_knn(&self, query: &[T], k: usize) -> Result<Vec<(usize, T)>, String> {
        if k == 0 {
            return Err("k must be at least 1".to_string());
        }
        Ok(search::linear::knn(self, ArrayView1::from(query), k))
    }

    /// Exhaustive range scan, bypassing the tree. Intended as a correctness
    /// baseline.
    #[must_use]
    pub fn linear_rnn(&self, query: &[T], radius: T) -> Vec<(usize, T)> {
        search::linear::rnn(self, ArrayView1::from(query), radius)
    }
}

impl<'a, P, M, T> Tree<'a, P, M, T>
where
    P: PointSet<T> + Sync,
    M: Metric<T>,
    T: DistanceValue,
{
    /// Parallel version of [`batch_knn`](Self::batch_knn). The tree is shared
    /// read-only; every query owns its scratch state.
    ///
    /// # Errors
    ///
    /// - See [`knn`](Self::knn).
    pub fn par_batch_knn(
        &self,
        queries: &[Vec<T>],
        k: usize,
        options: &KnnOptions<T>,
    ) -> Result<Vec<Vec<(usize, T)>>, String> {
        queries.par_iter().map(|q| self.knn(q, k, options)).collect()
    }

    /// Parallel version of [`batch_rnn`](Self::batch_rnn).
    #[must_use]
    pub fn par_batch_rnn(
        &self,
        queries: &[Vec<T>],
        radius: T,
        options: &RnnOptions,
    ) -> Vec<Vec<(usize, T)>> {
        queries.par_iter().map(|q| self.rnn(q, radius, options)).collect()
    }
}
