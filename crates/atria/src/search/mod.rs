//! Best-first branch-and-bound search over the clustering tree.

use core::cmp::Reverse;
use core::ops::RangeInclusive;

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::dataset::PointSet;
use crate::metric::Metric;
use crate::tree::{Cluster, Tree, ROOT};
use crate::utils::{DistanceValue, SizedHeap};

pub(crate) mod knn;
pub(crate) mod linear;
pub(crate) mod rnn;

/// Options for k-nearest-neighbor queries.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnnOptions<T: DistanceValue> {
    /// Relative slack on the pruning inequality. With `epsilon > 0` every
    /// returned distance is within a factor `1 + epsilon` of the true k-th
    /// nearest distance; zero is exact.
    pub epsilon: T,
    /// An inclusive band of point indices omitted from the results, for
    /// leave-one-out workflows.
    pub exclude_range: Option<RangeInclusive<usize>>,
}

impl<T: DistanceValue> Default for KnnOptions<T> {
    fn default() -> Self {
        Self {
            epsilon: T::zero(),
            exclude_range: None,
        }
    }
}

impl<T: DistanceValue> KnnOptions<T> {
    /// Sets the approximation slack.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the excluded index band.
    #[must_use]
    pub fn with_exclude_range(mut self, exclude_range: RangeInclusive<usize>) -> Self {
        self.exclude_range = Some(exclude_range);
        self
    }
}

/// Options for range queries.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RnnOptions {
    /// An inclusive band of point indices omitted from the results.
    pub exclude_range: Option<RangeInclusive<usize>>,
}

impl RnnOptions {
    /// Sets the excluded index band.
    #[must_use]
    pub fn with_exclude_range(mut self, exclude_range: RangeInclusive<usize>) -> Self {
        self.exclude_range = Some(exclude_range);
        self
    }
}

/// Counters describing the work a single query performed.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SearchStats {
    /// The number of metric evaluations performed.
    pub distance_calls: usize,
    /// `distance_calls / N`: the fraction of the point set the query paid
    /// for, relative to a linear scan.
    pub f_k: f64,
}

/// A cluster awaiting expansion during a query, with its distance bounds.
///
/// Parent context is carried in the item itself rather than through parent
/// pointers in the tree.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SearchItem<T: DistanceValue> {
    /// Arena index of the cluster.
    pub cluster: usize,
    /// The distance from the query to the cluster's center.
    pub dist: T,
    /// Optimistic lower bound on the distance from the query to any point in
    /// the cluster.
    pub d_min: T,
    /// Pessimistic upper bound on the distance from the query to any point in
    /// the cluster.
    pub d_max: T,
}

impl<T: DistanceValue> SearchItem<T> {
    /// The item for the root cluster, whose bounds come from the radius
    /// alone: the root has no sibling.
    fn root(dist: T, node: &Cluster<T>) -> Self {
        Self {
            cluster: ROOT,
            dist,
            d_min: T::zero().max(dist - node.radius()),
            d_max: dist + node.radius(),
        }
    }

    /// The item for a child cluster.
    ///
    /// The lower bound combines the ball bound `dist - radius`, the parent's
    /// own bound, and the sibling-gap bound
    /// `(dist - dist_brother + gap_min) / 2`; NaN terms drop out of the
    /// `max`/`min` chains, so anomalous metrics weaken the bounds instead of
    /// poisoning them.
    fn child(parent: &Self, cluster: usize, dist: T, dist_brother: T, node: &Cluster<T>) -> Self {
        let d_min = T::zero()
            .max(dist - node.radius())
            .max(parent.d_min)
            .max((dist - dist_brother + node.gap_min()).half());
        let d_max = parent.d_max.min(dist + node.radius());
        Self {
            cluster,
            dist,
            d_min,
            d_max,
        }
    }
}

/// The best-first frontier: a min-heap on `d_min` over pre-allocated storage.
pub(crate) type Frontier<T> = SizedHeap<SearchItem<T>, Reverse<T>>;

/// Per-query traversal state: the borrowed tree, the query view, the excluded
/// index band, and the metric-evaluation counter.
pub(crate) struct Cursor<'q, 't, 'a, P, M, T: DistanceValue> {
    /// The tree being searched.
    tree: &'t Tree<'a, P, M, T>,
    /// The query point.
    query: ArrayView1<'q, T>,
    /// The excluded index band, if any.
    exclude: Option<RangeInclusive<usize>>,
    /// The number of metric evaluations so far.
    calls: usize,
}

impl<'q, 't, 'a, P: PointSet<T>, M: Metric<T>, T: DistanceValue> Cursor<'q, 't, 'a, P, M, T> {
    /// Creates a cursor for one query.
    pub fn new(
        tree: &'t Tree<'a, P, M, T>,
        query: ArrayView1<'q, T>,
        exclude: Option<&RangeInclusive<usize>>,
    ) -> Self {
        Self {
            tree,
            query,
            exclude: exclude.cloned(),
            calls: 0,
        }
    }

    /// A frontier sized for this tree.
    pub fn frontier(&self) -> Frontier<T> {
        let mut frontier = Frontier::new(None);
        frontier.reserve(2 * self.tree.depth() + 2);
        frontier
    }

    /// The distance from the query to point `i`.
    pub fn distance_to(&mut self, i: usize) -> T {
        self.calls += 1;
        self.tree.data.distance_to_query(i, self.query, &self.tree.metric)
    }

    /// Threshold-aware distance from the query to point `i`.
    pub fn distance_to_upto(&mut self, i: usize, threshold: T) -> T {
        self.calls += 1;
        self.tree
            .data
            .distance_to_query_upto(i, self.query, threshold, &self.tree.metric)
    }

    /// Whether point `i` is excluded from the results.
    pub fn excluded(&self, i: usize) -> bool {
        self.exclude.as_ref().is_some_and(|band| band.contains(&i))
    }

    /// Builds the root's search item.
    pub fn root_item(&mut self) -> SearchItem<T> {
        let tree = self.tree;
        let root = &tree.clusters[ROOT];
        let dist = self.distance_to(root.center());
        SearchItem::root(dist, root)
    }

    /// Expands an internal cluster: computes the query distance to both child
    /// centers and pushes a search item per child.
    pub fn expand(&mut self, item: &SearchItem<T>, frontier: &mut Frontier<T>) {
        let tree = self.tree;
        let [left, right] = tree.clusters[item.cluster]
            .children()
            .unwrap_or_else(|| unreachable!("Only internal clusters are expanded"));
        let (left_node, right_node) = (&tree.clusters[left], &tree.clusters[right]);

        let d_left = self.distance_to(left_node.center());
        let d_right = self.distance_to(right_node.center());

        let left_item = SearchItem::child(item, left, d_left, d_right, left_node);
        let right_item = SearchItem::child(item, right, d_right, d_left, right_node);
        frontier.push((left_item, Reverse(left_item.d_min)));
        frontier.push((right_item, Reverse(right_item.d_min)));
    }

    /// The work counters accumulated by this query.
    #[expect(clippy::cast_precision_loss)]
    pub fn stats(&self) -> SearchStats {
        SearchStats {
            distance_calls: self.calls,
            f_k: self.calls as f64 / self.tree.cardinality() as f64,
        }
    }
}
