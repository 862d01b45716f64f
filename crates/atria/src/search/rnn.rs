//! Range search and range counting.

use ndarray::ArrayView1;

use crate::dataset::PointSet;
use crate::metric::Metric;
use crate::tree::Tree;
use crate::utils::{DistanceValue, MinItem};

use super::{Cursor, RnnOptions, SearchStats};

/// Returns all points within `radius` of `query`, sorted ascending by
/// `(distance, index)`, along with the query's work counters.
pub(crate) fn search<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<'_, P, M, T>,
    query: ArrayView1<T>,
    radius: T,
    options: &RnnOptions,
) -> (Vec<(usize, T)>, SearchStats) {
    let mut hits = Vec::new();
    let stats = walk(tree, query, radius, options, &mut |index, d| {
        hits.push((index, d));
    });
    hits.sort_by_key(|&(index, d)| MinItem((), (d, index)));
    (hits, stats)
}

/// Counts the points within `radius` of `query` without collecting them.
pub(crate) fn count<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<'_, P, M, T>,
    query: ArrayView1<T>,
    radius: T,
    options: &RnnOptions,
) -> usize {
    let mut n = 0;
    walk(tree, query, radius, options, &mut |_, _| n += 1);
    n
}

/// The traversal shared by collection and counting: the k-NN skeleton with
/// the result table replaced by an emit callback and the fixed radius as the
/// threshold.
fn walk<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<'_, P, M, T>,
    query: ArrayView1<T>,
    radius: T,
    options: &RnnOptions,
    emit: &mut impl FnMut(usize, T),
) -> SearchStats {
    let mut cursor = Cursor::new(tree, query, options.exclude_range.as_ref());
    let mut frontier = cursor.frontier();

    let root_item = cursor.root_item();
    frontier.push((root_item, core::cmp::Reverse(root_item.d_min)));

    while let Some((item, _)) = frontier.pop() {
        let cluster = &tree.clusters[item.cluster];

        let center = cluster.center();
        if !cursor.excluded(center) && item.dist <= radius {
            emit(center, item.dist);
        }

        if item.d_min > radius {
            continue;
        }

        if cluster.is_leaf() {
            let slice = tree.slice_of(cluster);
            if cluster.is_singleton() {
                // Every point in the slice sits at the center distance.
                if item.dist <= radius {
                    for &(index, _) in slice {
                        if !cursor.excluded(index) {
                            emit(index, item.dist);
                        }
                    }
                }
            } else {
                for &(index, d_center) in slice {
                    if cursor.excluded(index) {
                        continue;
                    }
                    if (item.dist - d_center).abs() <= radius {
                        let d = cursor.distance_to_upto(index, radius);
                        if d <= radius {
                            emit(index, d);
                        }
                    }
                }
            }
        } else {
            cursor.expand(&item, &mut frontier);
        }
    }

    cursor.stats()
}
