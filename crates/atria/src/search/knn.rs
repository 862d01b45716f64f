//! K-nearest-neighbor search.

use ndarray::ArrayView1;

use crate::dataset::PointSet;
use crate::metric::Metric;
use crate::tree::{Cluster, Tree};
use crate::utils::{DistanceValue, SizedHeap};

use super::{Cursor, KnnOptions, SearchItem, SearchStats};

/// The bounded result table: at most k entries keyed by `(distance, index)`,
/// so ties resolve the same way a brute-force lexicographic top-k does.
type Hits<T> = SizedHeap<usize, (T, usize)>;

/// The current worst `(distance, index)` key, against which every candidate
/// is tested; infinite while the table still has room.
fn threshold_key<T: DistanceValue>(hits: &Hits<T>) -> (T, usize) {
    if hits.is_full() {
        hits.peek()
            .map_or((T::infinity(), usize::MAX), |(_, &key)| key)
    } else {
        (T::infinity(), usize::MAX)
    }
}

/// Finds the `k` nearest neighbors of `query`, sorted ascending by
/// `(distance, index)`.
///
/// The caller has already validated `k` and the options.
pub(crate) fn search<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<'_, P, M, T>,
    query: ArrayView1<T>,
    k: usize,
    options: &KnnOptions<T>,
) -> (Vec<(usize, T)>, SearchStats) {
    let mut cursor = Cursor::new(tree, query, options.exclude_range.as_ref());
    let mut frontier = cursor.frontier();
    let mut hits = Hits::new(Some(k));
    let one_plus_epsilon = T::one() + options.epsilon;

    let root_item = cursor.root_item();
    frontier.push((root_item, core::cmp::Reverse(root_item.d_min)));

    while let Some((item, _)) = frontier.pop() {
        let cluster = &tree.clusters[item.cluster];

        // The center's distance was already paid for when the item was
        // created, so it is tested on every pop; pruning below only skips
        // the cluster's slice.
        let center = cluster.center();
        if !cursor.excluded(center) && (item.dist, center) < threshold_key(&hits) {
            hits.push((center, (item.dist, center)));
        }

        if threshold_key(&hits).0 < item.d_min * one_plus_epsilon {
            continue;
        }

        if cluster.is_leaf() {
            leaf_into_hits(&mut cursor, &mut hits, cluster, &item, tree.slice_of(cluster));
        } else {
            cursor.expand(&item, &mut frontier);
        }
    }

    let hits = hits
        .into_sorted_items()
        .into_iter()
        .map(|(index, (d, _))| (index, d))
        .collect();
    (hits, cursor.stats())
}

/// Tests every point of a leaf's slice against the result table.
fn leaf_into_hits<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    cursor: &mut Cursor<'_, '_, '_, P, M, T>,
    hits: &mut Hits<T>,
    cluster: &Cluster<T>,
    item: &SearchItem<T>,
    slice: &[(usize, T)],
) {
    if cluster.is_singleton() {
        // Every point in the slice coincides with the center, so its distance
        // to the query is the center distance; no metric calls needed.
        for &(index, _) in slice {
            if threshold_key(hits).0 < item.dist {
                break;
            }
            if !cursor.excluded(index) {
                hits.push((index, (item.dist, index)));
            }
        }
    } else {
        for &(index, d_center) in slice {
            if cursor.excluded(index) {
                continue;
            }
            let key = threshold_key(hits);
            // Triangle-inequality lower bound from the stored center
            // distance; only candidates that could displace the current
            // worst pay for a metric call.
            let lower = (item.dist - d_center).abs();
            if (lower, index) < key {
                let d = cursor.distance_to_upto(index, key.0);
                if (d, index) < key {
                    hits.push((index, (d, index)));
                }
            }
        }
    }
}
