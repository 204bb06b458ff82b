//! Slot arena backing the heap nodes
//!
//! Both heaps keep their nodes in a flat [`NodeArena`] and link them with
//! [`Slot`] indices instead of pointers. A missing link is `Option<Slot>::None`,
//! which costs nothing extra: `Slot` wraps a [`NonMaxU32`], so `u32::MAX` is the
//! niche that encodes "no parent" / "no child".
//!
//! # Characteristics
//! - Contiguous storage (one `Vec` per heap)
//! - Released slots go to a free list and are reused by later allocations
//! - Allocation is fallible: growth goes through `try_reserve`
//! - Dropping the arena frees every node at once, without walking the trees
//!
//! [`IdMap`] is the companion id → slot table each heap owns.

use crate::traits::{HeapError, NodeId};
use nonmax::NonMaxU32;
use std::ops::{Index, IndexMut};

/// Index of a node inside a [`NodeArena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct Slot(NonMaxU32);

impl Slot {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0.get() as usize
    }
}

/// A link that may be absent (`None` is the sentinel).
pub(crate) type Link = Option<Slot>;

/// Arena of heap nodes addressed by [`Slot`].
#[derive(Debug, Clone)]
pub(crate) struct NodeArena<N> {
    nodes: Vec<N>,
    free: Vec<Slot>,
    live: usize,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }
}

impl<N> NodeArena<N> {
    /// Allocates a node, letting the constructor see its own slot so that
    /// self-referential links (singleton rings) can be set up front.
    pub(crate) fn alloc_with(&mut self, make: impl FnOnce(Slot) -> N) -> Result<Slot, HeapError> {
        if let Some(slot) = self.free.pop() {
            self.nodes[slot.index()] = make(slot);
            self.live += 1;
            return Ok(slot);
        }

        let index = self.nodes.len();
        let raw = u32::try_from(index)
            .ok()
            .and_then(NonMaxU32::new)
            .ok_or(HeapError::AllocationFailed { requested: index + 1 })?;
        self.nodes
            .try_reserve(1)
            .map_err(|_| HeapError::AllocationFailed { requested: index + 1 })?;

        let slot = Slot(raw);
        self.nodes.push(make(slot));
        self.live += 1;
        Ok(slot)
    }

    /// Returns a slot to the free list. The node's contents stay readable
    /// until the slot is handed out again.
    pub(crate) fn release(&mut self, slot: Slot) {
        debug_assert!(slot.index() < self.nodes.len());
        debug_assert!(self.live > 0);
        self.free.push(slot);
        self.live -= 1;
    }

    /// Number of allocated (not released) nodes.
    pub(crate) fn live(&self) -> usize {
        self.live
    }

    /// Drops every node and forgets all slots, keeping the allocations.
    pub(crate) fn reset(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.live = 0;
    }
}

impl<N> Index<Slot> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, slot: Slot) -> &N {
        &self.nodes[slot.index()]
    }
}

impl<N> IndexMut<Slot> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, slot: Slot) -> &mut N {
        &mut self.nodes[slot.index()]
    }
}

/// Map from external node id to the slot holding that id, sized once at
/// heap creation.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdMap {
    slots: Vec<Link>,
}

impl IdMap {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub(crate) fn try_new(capacity: usize) -> Result<Self, HeapError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| HeapError::AllocationFailed {
                requested: capacity,
            })?;
        slots.resize(capacity, None);
        Ok(Self { slots })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Bounds-checked lookup. Out-of-range ids are reported and rejected.
    pub(crate) fn lookup(&self, id: NodeId) -> Result<Link, HeapError> {
        match self.slots.get(id) {
            Some(link) => Ok(*link),
            None => {
                log::warn!(
                    "node id {} out of range (capacity {})",
                    id,
                    self.slots.len()
                );
                Err(HeapError::NodeOutOfRange {
                    id,
                    capacity: self.slots.len(),
                })
            }
        }
    }

    /// Lookup without reporting; out-of-range ids read as absent.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Link {
        self.slots.get(id).copied().flatten()
    }

    #[inline]
    pub(crate) fn set(&mut self, id: NodeId, slot: Slot) {
        self.slots[id] = Some(slot);
    }

    #[inline]
    pub(crate) fn remove(&mut self, id: NodeId) {
        self.slots[id] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_index() {
        let mut arena: NodeArena<i32> = NodeArena::default();

        let a = arena.alloc_with(|_| 42).unwrap();
        let b = arena.alloc_with(|_| 7).unwrap();
        assert_ne!(a, b);
        assert_eq!(arena[a], 42);
        assert_eq!(arena[b], 7);

        arena[a] = 100;
        assert_eq!(arena[a], 100);
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn test_constructor_sees_own_slot() {
        let mut arena: NodeArena<Slot> = NodeArena::default();
        let s = arena.alloc_with(|me| me).unwrap();
        assert_eq!(arena[s], s);
    }

    #[test]
    fn test_released_slots_are_reused() {
        let mut arena: NodeArena<i32> = NodeArena::default();
        let a = arena.alloc_with(|_| 1).unwrap();
        let _b = arena.alloc_with(|_| 2).unwrap();

        arena.release(a);
        assert_eq!(arena.live(), 1);

        let c = arena.alloc_with(|_| 3).unwrap();
        assert_eq!(c, a);
        assert_eq!(arena[c], 3);
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn test_reset() {
        let mut arena: NodeArena<i32> = NodeArena::default();
        for i in 0..10 {
            arena.alloc_with(|_| i).unwrap();
        }
        arena.reset();
        assert_eq!(arena.live(), 0);

        let s = arena.alloc_with(|_| 5).unwrap();
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn test_id_map_bounds() {
        let mut map = IdMap::new(4);
        assert_eq!(map.capacity(), 4);
        assert_eq!(map.lookup(3), Ok(None));
        assert_eq!(
            map.lookup(4),
            Err(HeapError::NodeOutOfRange { id: 4, capacity: 4 })
        );

        let mut arena: NodeArena<()> = NodeArena::default();
        let s = arena.alloc_with(|_| ()).unwrap();
        map.set(2, s);
        assert_eq!(map.get(2), Some(s));
        map.remove(2);
        assert_eq!(map.get(2), None);
        assert_eq!(map.get(99), None);
    }

    #[test]
    fn test_id_map_try_new() {
        let map = IdMap::try_new(16).unwrap();
        assert_eq!(map.capacity(), 16);
        assert!(IdMap::try_new(usize::MAX).is_err());
    }

    #[test]
    fn test_link_is_niche_optimized() {
        assert_eq!(std::mem::size_of::<Link>(), std::mem::size_of::<u32>());
    }
}
