//! Common traits for the decrease-key heaps
//!
//! Both backends in this crate ([`FibonacciHeap`](crate::fibonacci::FibonacciHeap)
//! and [`PairingHeap`](crate::pairing::PairingHeap)) implement [`DecreaseKeyHeap`],
//! a priority queue over dense integer ids with `f64` keys.
//!
//! Unlike handle-based heaps, elements are addressed by their external id: each
//! heap owns an id → node table sized at creation, which gives O(1) membership
//! checks and O(1) decrease-key targeting. Insert and decrease-key are the same
//! operation ([`DecreaseKeyHeap::upsert`]), so a caller such as Dijkstra's
//! relaxation loop never has to track which ids are already queued.

use std::fmt;
use std::str::FromStr;

/// External node identifier, dense in `[0, capacity)`.
pub type NodeId = usize;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum HeapError {
    /// The id does not fit the table allocated at heap creation
    #[error("node id {id} out of range (capacity {capacity})")]
    NodeOutOfRange { id: NodeId, capacity: usize },
    /// Keys must be comparable; NaN is rejected
    #[error("invalid key {0}")]
    InvalidKey(f64),
    /// The id table or a node could not be allocated
    #[error("allocation failed ({requested} entries requested)")]
    AllocationFailed { requested: usize },
}

/// What an [`upsert`](DecreaseKeyHeap::upsert) did to the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// The id was absent and has been inserted
    Inserted,
    /// The id was present and its key was lowered
    Decreased,
    /// The id was present and the new key was not smaller; nothing changed
    Unchanged,
}

/// Priority queue over node ids with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use sssp_heaps::{DecreaseKeyHeap, Upsert};
/// use sssp_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::with_capacity(8);
/// assert_eq!(heap.insert(10.0, 3), Ok(Upsert::Inserted));
/// assert_eq!(heap.decrease_key(3, 4.0), Ok(Upsert::Decreased));
/// assert_eq!(heap.decrease_key(3, 9.0), Ok(Upsert::Unchanged));
/// assert_eq!(heap.extract_min(), Some(3));
/// assert_eq!(heap.extract_min(), None);
/// ```
pub trait DecreaseKeyHeap: Sized {
    /// Creates an empty heap accepting ids in `[0, max_nodes)`.
    ///
    /// # Time Complexity
    /// O(max_nodes) for the id table.
    fn with_capacity(max_nodes: usize) -> Self;

    /// Like [`with_capacity`](Self::with_capacity), but reports allocation
    /// failure of the id table instead of aborting.
    fn try_with_capacity(max_nodes: usize) -> Result<Self, HeapError>;

    /// Number of ids the heap accepts (fixed at creation).
    fn capacity(&self) -> usize;

    /// Number of ids currently queued.
    fn len(&self) -> usize;

    /// Returns true if no id is queued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `id` is currently queued.
    fn contains(&self, id: NodeId) -> bool;

    /// Current key of a queued id.
    fn key_of(&self, id: NodeId) -> Option<f64>;

    /// Minimum key and its id, without removing it.
    fn peek(&self) -> Option<(f64, NodeId)>;

    /// Inserts `id` with `key`, or lowers its key if it is already queued.
    ///
    /// A key that is not smaller than the current one is ignored
    /// ([`Upsert::Unchanged`]). Out-of-range ids and NaN keys are rejected and
    /// leave the heap untouched.
    ///
    /// # Time Complexity
    /// - Fibonacci Heap: O(1) amortized
    /// - Pairing Heap: o(log n) amortized
    fn upsert(&mut self, id: NodeId, key: f64) -> Result<Upsert, HeapError>;

    /// Inserts `id`; behaves as `decrease_key` if it is already queued.
    fn insert(&mut self, key: f64, id: NodeId) -> Result<Upsert, HeapError> {
        self.upsert(id, key)
    }

    /// Lowers the key of `id`; inserts it if it is not queued.
    fn decrease_key(&mut self, id: NodeId, new_key: f64) -> Result<Upsert, HeapError> {
        self.upsert(id, new_key)
    }

    /// Removes and returns the minimum key and its id, or `None` if empty.
    ///
    /// # Time Complexity
    /// O(log n) amortized for both backends.
    fn pop(&mut self) -> Option<(f64, NodeId)>;

    /// Removes and returns the id with the minimum key, or `None` if empty.
    fn extract_min(&mut self) -> Option<NodeId> {
        self.pop().map(|(_, id)| id)
    }

    /// Releases every queued node. The heap stays usable with the same
    /// capacity.
    ///
    /// # Time Complexity
    /// O(len), independent of the capacity.
    fn clear(&mut self);
}

/// Runtime selection of a heap backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapKind {
    Fibonacci,
    Pairing,
}

impl HeapKind {
    /// Every backend, in a stable order.
    pub const ALL: [HeapKind; 2] = [HeapKind::Fibonacci, HeapKind::Pairing];

    /// Short name used on the command line and in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            HeapKind::Fibonacci => "fib",
            HeapKind::Pairing => "pair",
        }
    }
}

impl fmt::Display for HeapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HeapKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fib" | "fibonacci" => Ok(HeapKind::Fibonacci),
            "pair" | "pairing" => Ok(HeapKind::Pairing),
            _ => Err(crate::Error::UnknownHeapKind(s.to_string())),
        }
    }
}

/// Rejects keys that cannot be ordered.
#[inline]
pub(crate) fn check_key(key: f64) -> Result<(), HeapError> {
    if key.is_nan() {
        log::warn!("rejecting NaN key");
        return Err(HeapError::InvalidKey(key));
    }
    Ok(())
}
