//! Exhaustive-scan baselines.

use ndarray::ArrayView1;

use crate::dataset::PointSet;
use crate::metric::Metric;
use crate::tree::Tree;
use crate::utils::{DistanceValue, MinItem, SizedHeap};

/// The `k` nearest neighbors by scanning every point, with the same
/// `(distance, index)` ordering as the tree search.
pub(crate) fn knn<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<'_, P, M, T>,
    query: ArrayView1<T>,
    k: usize,
) -> Vec<(usize, T)> {
    let mut hits = SizedHeap::<usize, (T, usize)>::new(Some(k));
    for i in 0..tree.cardinality() {
        let d = tree.data.distance_to_query(i, query, &tree.metric);
        hits.push((i, (d, i)));
    }
    hits.into_sorted_items()
        .into_iter()
        .map(|(index, (d, _))| (index, d))
        .collect()
}

/// All points within `radius` by scanning every point.
pub(crate) fn rnn<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<'_, P, M, T>,
    query: ArrayView1<T>,
    radius: T,
) -> Vec<(usize, T)> {
    let mut hits = (0..tree.cardinality())
        .filter_map(|i| {
            let d = tree.data.distance_to_query(i, query, &tree.metric);
            (d <= radius).then_some((i, d))
        })
        .collect::<Vec<_>>();
    hits.sort_by_key(|&(index, d)| MinItem((), (d, index)));
    hits
}
