//! Binary min-heap keyed by an `f64` priority.
//!
//! `std::collections::BinaryHeap` is a max-heap over `Ord` items, and `f64`
//! is not `Ord`.  `MinHeap` wraps it with an entry type whose ordering is the
//! reversed IEEE total order of the priority, so `pop` yields the smallest
//! priority first.  Infinite priorities are fine; NaN sorts after +inf.
//!
//! Entries with equal priority pop in unspecified order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct Entry<T> {
    priority: f64,
    item:     T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the max-heap surfaces the smallest priority.
        other.priority.total_cmp(&self.priority)
    }
}

/// A min-priority queue of `(priority, item)` pairs.
pub struct MinHeap<T> {
    inner: BinaryHeap<Entry<T>>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self { inner: BinaryHeap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { inner: BinaryHeap::with_capacity(capacity) }
    }

    pub fn push(&mut self, priority: f64, item: T) {
        self.inner.push(Entry { priority, item });
    }

    /// Remove and return the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<(f64, T)> {
        self.inner.pop().map(|e| (e.priority, e.item))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
