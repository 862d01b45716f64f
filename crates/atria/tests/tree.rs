//! Tests for tree construction: the permutation-table invariants, the
//! cluster layout, determinism, and the configuration error surface.

use atria::{
    BuildOptions, Chebyshev, Cluster, DelayEmbedding, DistanceValue, Euclidean, Manhattan,
    MatrixSet, Metric, PointSet, Tree,
};
use test_case::test_case;

mod common;

/// Checks every structural invariant of a built tree against its point set.
fn check_invariants<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(tree: &Tree<P, M, T>) {
    let n = tree.cardinality();

    // The multiset of permutation indices is exactly {0..N}.
    let mut indices = tree.permutation().iter().map(|&(i, _)| i).collect::<Vec<_>>();
    indices.sort_unstable();
    assert_eq!(indices, (0..n).collect::<Vec<_>>(), "Index multiset mismatch");

    // Every point is either some cluster's center or in exactly one leaf
    // slice, and the tree is a full binary tree.
    let leaf_slice_total = tree
        .clusters()
        .iter()
        .filter(|c| c.is_leaf())
        .map(|c| c.span().len())
        .sum::<usize>();
    assert_eq!(
        tree.cluster_count() + leaf_slice_total,
        n,
        "Centers and leaf slices must partition the point set"
    );
    assert_eq!(
        tree.cluster_count(),
        2 * tree.leaf_count() - 1,
        "A full binary tree has 2L - 1 nodes"
    );

    for cluster in tree.clusters() {
        check_radius(tree, cluster);
        if cluster.is_leaf() {
            check_leaf(tree, cluster);
        } else {
            check_split(tree, cluster);
        }
    }
}

/// The recomputed farthest own-center distance over a cluster's slice equals
/// the stored radius.
fn check_radius<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<P, M, T>,
    cluster: &Cluster<T>,
) {
    let data = tree.data();
    let metric = tree.metric();
    let max = tree
        .slice_of(cluster)
        .iter()
        .map(|&(i, _)| data.distance_between(i, cluster.center(), metric))
        .fold(T::zero(), |acc, d| if d > acc { d } else { acc });
    assert_eq!(
        max,
        cluster.radius(),
        "Radius must be the farthest distance in the slice (cluster {cluster:?})"
    );
}

/// Every entry of a leaf's slice holds its distance to the leaf's center.
fn check_leaf<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<P, M, T>,
    leaf: &Cluster<T>,
) {
    let data = tree.data();
    let metric = tree.metric();
    for &(index, stored) in tree.slice_of(leaf) {
        let d = data.distance_between(index, leaf.center(), metric);
        assert_eq!(stored, d, "Leaf entry must store the own-center distance");
        assert!(d <= leaf.radius(), "Leaf entry past the radius");
    }
}

/// The boundary-convention layout and the nearest-center side assignment of
/// an internal cluster's split.
fn check_split<P: PointSet<T>, M: Metric<T>, T: DistanceValue>(
    tree: &Tree<P, M, T>,
    cluster: &Cluster<T>,
) {
    let data = tree.data();
    let metric = tree.metric();
    let clusters = tree.clusters();
    let [left, right] = cluster
        .children()
        .map(|[l, r]| [&clusters[l], &clusters[r]])
        .unwrap_or_else(|| unreachable!("`cluster` is internal"));

    // Child centers sit at the slice boundaries and are excluded from the
    // child slices.
    let span = cluster.span();
    assert_eq!(left.span().start, span.start + 1);
    assert_eq!(right.span().start, left.span().end);
    assert_eq!(right.span().end, span.end - 1);

    let table = tree.permutation();
    let (first, first_d) = table[span.start];
    let (last, last_d) = table[span.end - 1];
    assert_eq!(first, left.center(), "Left center at the first position");
    assert_eq!(last, right.center(), "Right center at the last position");
    assert_eq!(first_d, data.distance_between(first, cluster.center(), metric));
    assert_eq!(last_d, data.distance_between(last, cluster.center(), metric));
    assert_eq!(last_d, cluster.radius(), "The right center is the farthest point");

    // Both children carry the same split gap, and every point ended up on
    // the side of its nearer center with its own-center distance stored.
    assert_eq!(left.gap_min(), right.gap_min());
    for &(index, stored) in tree.slice_of(left) {
        let d_own = data.distance_between(index, left.center(), metric);
        let d_sib = data.distance_between(index, right.center(), metric);
        assert_eq!(stored, d_own);
        assert!(d_own <= d_sib, "Left-assigned point closer to the right center");
        assert!((d_own - d_sib).abs() >= left.gap_min(), "Split gap too large");
    }
    for &(index, stored) in tree.slice_of(right) {
        let d_own = data.distance_between(index, right.center(), metric);
        let d_sib = data.distance_between(index, left.center(), metric);
        assert_eq!(stored, d_own);
        assert!(d_sib > d_own, "Right-assigned point not closer to the right center");
        assert!((d_own - d_sib).abs() >= right.gap_min(), "Split gap too large");
    }
}

#[test_case(10, 2, 1; "10x2 leaves of 1")]
#[test_case(100, 3, 2; "100x3 leaves of 2")]
#[test_case(1_000, 10, 8; "1_000x10 leaves of 8")]
#[test_case(1_000, 2, 64; "1_000x2 leaves of 64")]
fn euclidean_invariants(car: usize, dim: usize, min_points: usize) -> Result<(), String> {
    let data = common::data_gen::tabular(car, dim, -1.0, 1.0, 42);
    let points = MatrixSet::from_rows(data)?;
    let options = BuildOptions::default().with_min_points(min_points).with_seed(42);
    let tree = Tree::new(&points, Euclidean, &options)?;
    check_invariants(&tree);
    Ok(())
}

#[test_case(500, 5; "500x5")]
fn chebyshev_invariants(car: usize, dim: usize) -> Result<(), String> {
    let data = common::data_gen::tabular(car, dim, -1.0, 1.0, 7);
    let points = MatrixSet::from_rows(data)?;
    let options = BuildOptions::default().with_min_points(4).with_seed(7);
    let tree = Tree::new(&points, Chebyshev, &options)?;
    check_invariants(&tree);
    Ok(())
}

#[test_case(500, 5; "500x5")]
fn manhattan_invariants(car: usize, dim: usize) -> Result<(), String> {
    let data = common::data_gen::tabular(car, dim, -1.0, 1.0, 7);
    let points = MatrixSet::from_rows(data)?;
    let options = BuildOptions::default().with_min_points(4).with_seed(7);
    let tree = Tree::new(&points, Manhattan, &options)?;
    check_invariants(&tree);
    Ok(())
}

#[test]
fn delay_embedding_invariants() -> Result<(), String> {
    let series = common::data_gen::sine_series(512);
    let points = DelayEmbedding::new(series, 3, 2)?;
    assert_eq!(points.cardinality(), 512 - 2 * 2);
    assert_eq!(points.dimensionality(), 3);

    let options = BuildOptions::default().with_min_points(8).with_seed(3);
    let tree = Tree::new(&points, Euclidean, &options)?;
    check_invariants(&tree);
    Ok(())
}

#[test]
fn delay_embedding_points() -> Result<(), String> {
    let series = (0..10).map(f64::from).collect::<Vec<_>>();
    let points = DelayEmbedding::new(series, 3, 2)?;
    assert_eq!(points.cardinality(), 6);
    assert_eq!(points.point(0).to_vec(), vec![0.0, 2.0, 4.0]);
    assert_eq!(points.point(1).to_vec(), vec![1.0, 3.0, 5.0]);
    assert_eq!(points.point(5).to_vec(), vec![5.0, 7.0, 9.0]);
    Ok(())
}

#[test]
fn determinism() -> Result<(), String> {
    let data = common::data_gen::tabular(300, 4, -1.0, 1.0, 11);
    let points = MatrixSet::from_rows(data)?;
    let options = BuildOptions::default().with_min_points(4).with_seed(99);

    let first = Tree::new(&points, Euclidean, &options)?;
    let second = Tree::new(&points, Euclidean, &options)?;

    assert_eq!(first.permutation(), second.permutation());
    assert_eq!(first.clusters(), second.clusters());
    assert_eq!(first.depth(), second.depth());
    Ok(())
}

#[test]
fn coincident_points_collapse() -> Result<(), String> {
    let points = MatrixSet::from_rows(vec![vec![1.0_f64, 1.0]; 4])?;
    let tree = Tree::new(&points, Euclidean, &BuildOptions::default().with_min_points(1))?;

    // No spread, so even min_points = 1 cannot split the root.
    assert_eq!(tree.cluster_count(), 1);
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().radius(), 0.0);
    check_invariants(&tree);
    Ok(())
}

#[test]
fn single_point() -> Result<(), String> {
    let points = MatrixSet::from_rows(vec![vec![2.5_f64, -1.0]])?;
    let tree = Tree::new(&points, Euclidean, &BuildOptions::default())?;
    assert_eq!(tree.cluster_count(), 1);
    assert_eq!(tree.root().cardinality(), 1);
    check_invariants(&tree);
    Ok(())
}

#[test]
fn introspection() -> Result<(), String> {
    let data = common::data_gen::tabular(1_000, 3, -1.0, 1.0, 5);
    let points = MatrixSet::from_rows(data)?;
    let tree = Tree::new(&points, Euclidean, &BuildOptions::default().with_min_points(16).with_seed(5))?;

    assert!(tree.depth() > 1);
    assert!(tree.leaf_count() > 1);
    assert_eq!(tree.cluster_count(), 2 * tree.leaf_count() - 1);
    let mean = tree.mean_leaf_size();
    assert!(mean >= 1.0);
    assert!(mean <= 17.0, "Leaves of more than min_points + 1 points: {mean}");
    Ok(())
}

#[test]
fn configuration_errors() {
    assert!(MatrixSet::<f64>::from_rows(Vec::new()).is_err());
    assert!(MatrixSet::from_rows(vec![vec![1.0_f64], vec![2.0, 3.0]]).is_err());

    let points = MatrixSet::from_rows(vec![vec![0.0_f64, 0.0], vec![1.0, 1.0]])
        .unwrap_or_else(|e| unreachable!("{e}"));
    let options = BuildOptions::default().with_min_points(0);
    assert!(Tree::new(&points, Euclidean, &options).is_err());

    assert!(DelayEmbedding::new(vec![1.0_f64; 10], 0, 1).is_err());
    assert!(DelayEmbedding::new(vec![1.0_f64; 10], 3, 0).is_err());
    assert!(DelayEmbedding::new(vec![1.0_f64; 4], 3, 2).is_err());
    assert!(DelayEmbedding::new(vec![1.0_f64; 5], 3, 2).is_ok());
}
