//! Tree construction by farthest-point partitioning.

use core::ops::Range;

use rand::prelude::*;

use crate::dataset::PointSet;
use crate::metric::Metric;
use crate::utils::{DistanceValue, MaxItem};

use super::Cluster;

/// Arena index of the root cluster.
pub(crate) const ROOT: usize = 0;

/// Construction state: exclusive, mutable ownership of the permutation table
/// and the cluster arena until the finished tree takes them over.
pub(crate) struct Builder<'a, P, M, T: DistanceValue> {
    /// The point set being indexed.
    data: &'a P,
    /// The metric all distances are measured with.
    metric: &'a M,
    /// Slices of at most this many points are not subdivided further.
    min_points: usize,
    /// The permutation table under construction.
    permutation: Vec<(usize, T)>,
    /// The cluster arena under construction.
    clusters: Vec<Cluster<T>>,
}

impl<'a, P: PointSet<T>, M: Metric<T>, T: DistanceValue> Builder<'a, P, M, T> {
    /// Creates a builder for the given point set and metric.
    pub fn new(data: &'a P, metric: &'a M, min_points: usize) -> Self {
        let n = data.cardinality();
        Self {
            data,
            metric,
            min_points,
            permutation: Vec::with_capacity(n),
            clusters: Vec::new(),
        }
    }

    /// Builds the tree and returns the permutation table, the cluster arena,
    /// and the number of levels.
    ///
    /// The caller must ensure that the point set is non-empty and that
    /// `min_points` is at least 1. After that, construction cannot fail:
    /// degenerate slices (all points coincident, or a metric returning NaN)
    /// collapse into leaves.
    pub fn build(mut self, seed: Option<u64>) -> (Vec<(usize, T)>, Vec<Cluster<T>>, usize) {
        let n = self.data.cardinality();

        // The root center is drawn uniformly; everything after this choice is
        // deterministic.
        let root_center = {
            let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
            rng.gen_range(0..n)
        };

        self.permutation.push((root_center, T::zero()));
        for i in (0..n).filter(|&i| i != root_center) {
            let d = self.data.distance_between(i, root_center, self.metric);
            self.permutation.push((i, d));
        }
        let radius = self.argmax_distance(1..n).map_or_else(T::zero, |(_, d)| d);
        self.clusters.push(Cluster {
            center: root_center,
            radius,
            gap_min: T::zero(),
            start: 1,
            len: n - 1,
            children: None,
        });

        // Depth-first over an explicit work list; the call stack would not
        // survive adversarial data where the tree degenerates to a path.
        let mut depth = 1;
        let mut stack = vec![(ROOT, 1)];
        while let Some((index, level)) = stack.pop() {
            depth = depth.max(level);
            if self.clusters[index].len <= self.min_points {
                continue;
            }
            if let Some([left, right]) = self.subdivide(index) {
                stack.push((left, level + 1));
                stack.push((right, level + 1));
            }
        }

        (self.permutation, self.clusters, depth)
    }

    /// Splits the cluster at `index` into two children and returns their arena
    /// indices, or `None` when the slice is degenerate and the cluster stays a
    /// leaf.
    ///
    /// On entry, every entry of the cluster's slice holds its distance to the
    /// cluster's own center; on exit the same holds for both child slices,
    /// which is what makes the children subdividable without a second pass.
    fn subdivide(&mut self, index: usize) -> Option<[usize; 2]> {
        let Cluster { start, len, .. } = self.clusters[index];

        // The farthest point from the cluster's center becomes the right
        // child's center and moves to the last position of the slice. A slice
        // with no spread (or a NaN scan) collapses to a leaf.
        let (far_pos, far_d) = self.argmax_distance(start..start + len)?;
        if !(far_d > T::zero()) {
            return None;
        }
        let last = start + len - 1;
        self.permutation.swap(far_pos, last);
        let right_center = self.permutation[last].0;

        // Rewrite every remaining entry against the right center, tracking the
        // farthest as the left center. Its pre-rewrite distance is kept so the
        // boundary position still holds the distance to the parent's center.
        let mut best: Option<(usize, T, T)> = None;
        for p in start..last {
            let (idx, parent_d) = self.permutation[p];
            let d = self.data.distance_between(idx, right_center, self.metric);
            self.permutation[p].1 = d;
            if best.map_or(true, |(_, best_d, _)| d > best_d) {
                best = Some((p, d, parent_d));
            }
        }
        let (left_pos, centers_d, left_parent_d) = best
            .unwrap_or_else(|| unreachable!("The slice holds at least one point besides the right center"));
        self.permutation.swap(left_pos, start);
        let left_center = self.permutation[start].0;
        self.permutation[start].1 = left_parent_d;

        // Dual-pointer sweep over the interior: positions below `i` are
        // assigned to the left child, positions at or above `j` to the right
        // child. Each point's stored distance to the right center is reused
        // and exactly one distance to the left center is computed, with ties
        // going left. The swapped-in entry at `i` is examined next, so every
        // interior point is classified exactly once.
        let mut gap_min = centers_d;
        let mut left_radius = T::zero();
        let mut right_radius = T::zero();
        let mut i = start + 1;
        let mut j = last;
        while i < j {
            let (idx, d_right) = self.permutation[i];
            let d_left = self.data.distance_between(idx, left_center, self.metric);
            let gap = (d_left - d_right).abs();
            if gap < gap_min || gap_min.is_nan() {
                gap_min = gap;
            }
            if d_left <= d_right {
                self.permutation[i].1 = d_left;
                if d_left > left_radius {
                    left_radius = d_left;
                }
                i += 1;
            } else {
                // A NaN distance lands here and is carried as-is; the cluster
                // it ends up in degrades but stays well-formed.
                j -= 1;
                self.permutation.swap(i, j);
                if d_right > right_radius {
                    right_radius = d_right;
                }
            }
        }

        let left = Cluster {
            center: left_center,
            radius: left_radius,
            gap_min,
            start: start + 1,
            len: i - start - 1,
            children: None,
        };
        let right = Cluster {
            center: right_center,
            radius: right_radius,
            gap_min,
            start: i,
            len: last - i,
            children: None,
        };

        let left_index = self.clusters.len();
        self.clusters.push(left);
        let right_index = self.clusters.len();
        self.clusters.push(right);
        self.clusters[index].children = Some([left_index, right_index]);

        Some([left_index, right_index])
    }

    /// Returns the position and value of the largest stored distance over a
    /// range of permutation-table positions. NaN entries never win the scan.
    fn argmax_distance(&self, span: Range<usize>) -> Option<(usize, T)> {
        let offset = span.start;
        self.permutation[span]
            .iter()
            .enumerate()
            .max_by_key(|&(p, &(_, d))| MaxItem(p, d))
            .map(|(p, &(_, d))| (offset + p, d))
    }
}
