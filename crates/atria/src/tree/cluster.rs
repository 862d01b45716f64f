//! A node of the clustering tree.

use core::ops::Range;

use crate::utils::DistanceValue;

/// A cluster is a set of points within `radius` of a `center` point, covering
/// a contiguous slice of the tree's permutation table.
///
/// Clusters live in a flat arena owned by the [`Tree`](super::Tree); child
/// links are arena indices. The center is excluded from the cluster's own
/// slice: it sits at a boundary position of the parent's slice (or, for the
/// root, at permutation position 0).
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster<T: DistanceValue> {
    /// The index of the cluster's center point.
    pub(crate) center: usize,
    /// The maximum distance from the center to any point in the slice.
    pub(crate) radius: T,
    /// The smallest gap, over the points of the parent's split, between a
    /// point's distance to this center and to the sibling center. Zero for
    /// the root.
    pub(crate) gap_min: T,
    /// The first permutation-table position owned by this cluster.
    pub(crate) start: usize,
    /// The number of permutation-table positions owned by this cluster.
    pub(crate) len: usize,
    /// Arena indices of the child clusters; `None` for a leaf.
    pub(crate) children: Option<[usize; 2]>,
}

impl<T: DistanceValue> Cluster<T> {
    /// The index of the cluster's center point.
    #[must_use]
    pub const fn center(&self) -> usize {
        self.center
    }

    /// The maximum distance from the center to any point in the slice.
    #[must_use]
    pub const fn radius(&self) -> T {
        self.radius
    }

    /// The smallest own-center/sibling-center distance gap over the parent's
    /// split; used to tighten search lower bounds.
    #[must_use]
    pub const fn gap_min(&self) -> T {
        self.gap_min
    }

    /// The permutation-table slice owned by this cluster.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// The number of points in the cluster, including the center.
    #[must_use]
    pub const fn cardinality(&self) -> usize {
        self.len + 1
    }

    /// Arena indices of the child clusters. Returns `None` for a leaf.
    #[must_use]
    pub const fn children(&self) -> Option<[usize; 2]> {
        self.children
    }

    /// Checks if the cluster is a leaf.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Checks if every point in the cluster coincides with its center.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.len == 0 || self.radius == T::zero()
    }
}
