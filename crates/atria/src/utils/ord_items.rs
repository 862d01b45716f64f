//! Total-order adapters over partially ordered keys.

use core::cmp::Ordering;

/// An item with an associated key, ordered so that an incomparable key (e.g.
/// a NaN distance) never wins a `max_by_key` scan or rises to the top of a
/// `BinaryHeap`.
///
/// # Type Parameters
///
/// - `A`: The type of the associated data. This is ignored when determining
///   the ordering.
/// - `T`: The type of the key by which items are ordered.
#[derive(Clone, Copy, Debug)]
pub struct MaxItem<A, T: PartialOrd>(pub A, pub T);

impl<A, T: PartialOrd> PartialEq for MaxItem<A, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A, T: PartialOrd> Eq for MaxItem<A, T> {}

impl<A, T: PartialOrd> PartialOrd for MaxItem<A, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A, T: PartialOrd> Ord for MaxItem<A, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.1.partial_cmp(&other.1).unwrap_or(Ordering::Less)
    }
}

/// The counterpart of [`MaxItem`]: an incomparable key never wins a
/// `min_by_key` scan.
///
/// A `BinaryHeap` of `MinItem`s is a max-heap over the keys, which is how the
/// bounded result table keeps its worst entry at the top.
#[derive(Clone, Copy, Debug)]
pub struct MinItem<A, T: PartialOrd>(pub A, pub T);

impl<A, T: PartialOrd> PartialEq for MinItem<A, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<A, T: PartialOrd> Eq for MinItem<A, T> {}

impl<A, T: PartialOrd> PartialOrd for MinItem<A, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A, T: PartialOrd> Ord for MinItem<A, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.1.partial_cmp(&other.1).unwrap_or(Ordering::Greater)
    }
}
