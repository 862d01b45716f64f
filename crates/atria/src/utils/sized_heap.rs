//! A helper struct for maintaining a max heap of an optionally fixed size.

use std::collections::BinaryHeap;

use super::MinItem;

/// A helper struct for maintaining a max heap of a fixed size.
///
/// With a size bound of `k` this is the k-nearest-neighbor result table: the
/// top of the heap is the worst neighbor kept so far, so the current search
/// threshold is available in constant time. Without a bound it doubles as the
/// best-first frontier when keyed by `Reverse`d lower bounds.
///
/// # Type Parameters
///
/// - `A`: The type of the associated data with each item in the heap. This is
///   ignored when determining the ordering of the heap.
/// - `T`: The type of the keys by which the heap is ordered.
#[derive(Debug)]
pub struct SizedHeap<A, T: PartialOrd> {
    /// The heap of items.
    heap: BinaryHeap<MinItem<A, T>>,
    /// The maximum size of the heap.
    k: usize,
}

impl<A, T: PartialOrd + Copy> SizedHeap<A, T> {
    /// Creates a new `SizedHeap` with an optional maximum size.
    #[must_use]
    pub fn new(k: Option<usize>) -> Self {
        k.map_or_else(
            || Self {
                heap: BinaryHeap::new(),
                k: usize::MAX,
            },
            |k| Self {
                heap: BinaryHeap::with_capacity(k),
                k,
            },
        )
    }

    /// Reserves capacity for at least `additional` more items.
    pub fn reserve(&mut self, additional: usize) {
        self.heap.reserve(additional);
    }

    /// Pushes an item onto the heap, maintaining the max size.
    pub fn push(&mut self, (a, key): (A, T)) {
        if self.heap.len() < self.k {
            self.heap.push(MinItem(a, key));
        } else if self.heap.peek().is_some_and(|top| key < top.1) {
            self.heap.pop();
            self.heap.push(MinItem(a, key));
        }
    }

    /// Peeks at the top item in the heap.
    #[must_use]
    pub fn peek(&self) -> Option<(&A, &T)> {
        self.heap.peek().map(|MinItem(a, key)| (a, key))
    }

    /// Pops the top item from the heap.
    pub fn pop(&mut self) -> Option<(A, T)> {
        self.heap.pop().map(|MinItem(a, key)| (a, key))
    }

    /// The number of items currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns whether the heap is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns whether the heap is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Consumes the heap and returns its items sorted ascending by key.
    #[must_use]
    pub fn into_sorted_items(self) -> Vec<(A, T)> {
        let mut items = self
            .heap
            .into_iter()
            .map(|MinItem(a, key)| (a, key))
            .collect::<Vec<_>>();
        items.sort_by_key(|&(_, key)| MinItem((), key));
        items
    }
}
