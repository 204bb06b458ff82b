//! Binary min-heap for lazy-deletion searches
//!
//! Entries are `(key, id)` pairs with no id index, so the same id may be
//! queued several times. The bidirectional search pushes a fresh entry when a
//! distance improves and drops entries that no longer match its distance
//! table when they reach the top.
//!
//! Single-source runs use the decrease-key heaps instead
//! ([`FibonacciHeap`](crate::fibonacci::FibonacciHeap) or
//! [`PairingHeap`](crate::pairing::PairingHeap)).
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//!
//! # Example
//!
//! ```rust
//! use sssp_heaps::binary::BinaryHeap;
//!
//! let mut heap = BinaryHeap::new();
//! heap.push(3.0, 3);
//! heap.push(1.0, 1);
//! heap.push(2.0, 2);
//!
//! assert_eq!(heap.peek(), Some((1.0, 1)));
//! assert_eq!(heap.pop(), Some((1.0, 1)));
//! assert_eq!(heap.pop(), Some((2.0, 2)));
//! assert_eq!(heap.pop(), Some((3.0, 3)));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::NodeId;

/// Implicit binary tree in a `Vec`: children of `i` sit at `2i + 1` and `2i + 2`.
#[derive(Debug, Clone, Default)]
pub struct BinaryHeap {
    data: Vec<(f64, NodeId)>,
}

impl BinaryHeap {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Pushes an entry. NaN keys are not ordered and must not be pushed.
    pub fn push(&mut self, key: f64, id: NodeId) {
        debug_assert!(!key.is_nan());
        self.data.push((key, id));
        self.sift_up(self.data.len() - 1);
    }

    pub fn peek(&self) -> Option<(f64, NodeId)> {
        self.data.first().copied()
    }

    /// Smallest key, or infinity when empty.
    pub fn top_key(&self) -> f64 {
        self.data.first().map_or(f64::INFINITY, |&(key, _)| key)
    }

    pub fn pop(&mut self) -> Option<(f64, NodeId)> {
        if self.data.is_empty() {
            return None;
        }
        // The last leaf fills the hole at the root, then sinks
        let top = self.data.swap_remove(0);
        self.sift_down(0);
        Some(top)
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.data[parent].0 <= self.data[pos].0 {
                return;
            }
            self.data.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.data.len();
        loop {
            let first = 2 * pos + 1;
            if first >= len {
                return;
            }
            // Smaller of the one or two children
            let child = if first + 1 < len && self.data[first + 1].0 < self.data[first].0 {
                first + 1
            } else {
                first
            };
            if self.data[pos].0 <= self.data[child].0 {
                return;
            }
            self.data.swap(pos, child);
            pos = child;
        }
    }
}
