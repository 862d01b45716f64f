//! ATRIA: an in-memory spatial index for exact and approximate
//! nearest-neighbor queries over a finite point set under an arbitrary
//! metric.
//!
//! The index is a binary clustering tree built by farthest-point
//! partitioning. The spatial layout lives in a single permutation table of
//! `(point index, distance)` entries; every cluster covers a contiguous slice
//! of it and an entry's distance is measured against the center of the
//! deepest cluster owning its position. Queries run best-first over the tree
//! and prune with the triangle inequality, optionally relaxed by a
//! `(1 + epsilon)` factor.
//!
//! The index never copies the points: it borrows a [`PointSet`] and returns
//! results as `(index, distance)` pairs.
//!
//! - [`Tree::knn`]: the k nearest neighbors of a query point.
//! - [`Tree::rnn`]: all points within a radius.
//! - [`Tree::rnn_count`]: the cardinality of a range query.

mod dataset;
mod metric;
mod search;
mod tree;
pub mod utils;

pub use dataset::{DelayEmbedding, MatrixSet, PointSet};
pub use metric::{Chebyshev, Euclidean, Manhattan, Metric};
pub use search::{KnnOptions, RnnOptions, SearchStats};
pub use tree::{BuildOptions, Cluster, Tree};

pub use utils::DistanceValue;
