//! Pairing Heap implementation
//!
//! A pairing heap is a type of heap-ordered tree with:
//! - O(1) amortized insert and merge
//! - O(log n) amortized delete_min
//! - o(log n) amortized decrease_key (in fact, better than log n)
//!
//! The pairing heap is simpler than Fibonacci heaps while still providing
//! excellent amortized performance for decrease_key operations.
//!
//! Each node keeps a first-child link, a next-sibling link, a previous-sibling
//! link and a parent link. Only the first child of a node has no previous
//! sibling, so a node can be detached from its sibling list in O(1) without
//! walking it.
//!
//! After the root is removed its children are combined with the multi-pass
//! scheme: adjacent trees are paired left to right, and the resulting list is
//! paired again until a single tree remains.

use crate::arena::{IdMap, Link, NodeArena, Slot};
use crate::traits::{check_key, DecreaseKeyHeap, HeapError, NodeId, Upsert};

#[derive(Debug, Clone, Copy)]
struct Node {
    key: f64,
    id: NodeId,
    child: Link,
    sibling: Link,
    prev: Link,
    parent: Link,
}

/// Pairing Heap
///
/// # Example
///
/// ```rust
/// use sssp_heaps::pairing::PairingHeap;
/// use sssp_heaps::DecreaseKeyHeap;
///
/// let mut heap = PairingHeap::with_capacity(4);
/// heap.insert(5.0, 0).unwrap();
/// heap.insert(3.0, 1).unwrap();
/// heap.decrease_key(0, 1.0).unwrap();
/// assert_eq!(heap.peek(), Some((1.0, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct PairingHeap {
    root: Link,
    len: usize,
    nodes: NodeArena<Node>,
    map: IdMap,
    // Reused by pop() for the detached children of the root
    trees: Vec<Slot>,
}

impl DecreaseKeyHeap for PairingHeap {
    fn with_capacity(max_nodes: usize) -> Self {
        Self::from_map(IdMap::new(max_nodes))
    }

    fn try_with_capacity(max_nodes: usize) -> Result<Self, HeapError> {
        IdMap::try_new(max_nodes).map(Self::from_map)
    }

    fn capacity(&self) -> usize {
        self.map.capacity()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn contains(&self, id: NodeId) -> bool {
        self.map.get(id).is_some()
    }

    fn key_of(&self, id: NodeId) -> Option<f64> {
        self.map.get(id).map(|slot| self.nodes[slot].key)
    }

    fn peek(&self) -> Option<(f64, NodeId)> {
        self.root.map(|slot| {
            let node = &self.nodes[slot];
            (node.key, node.id)
        })
    }

    fn upsert(&mut self, id: NodeId, key: f64) -> Result<Upsert, HeapError> {
        check_key(key)?;
        match self.map.lookup(id)? {
            Some(slot) => Ok(self.lower_key(slot, key)),
            None => self.insert_new(id, key),
        }
    }

    fn pop(&mut self) -> Option<(f64, NodeId)> {
        let root = self.root?;

        let mut trees = std::mem::take(&mut self.trees);
        trees.clear();
        let mut current = self.nodes[root].child.take();
        while let Some(child) = current {
            let node = &mut self.nodes[child];
            current = node.sibling.take();
            node.prev = None;
            node.parent = None;
            trees.push(child);
        }

        self.root = self.combine(&mut trees);
        self.trees = trees;

        let Node { key, id, .. } = self.nodes[root];
        self.map.remove(id);
        self.nodes.release(root);
        self.len -= 1;
        Some((key, id))
    }

    fn clear(&mut self) {
        let mut pending: Vec<Slot> = Vec::new();
        pending.extend(self.root);

        while let Some(slot) = pending.pop() {
            let Node {
                id, child, sibling, ..
            } = self.nodes[slot];
            pending.extend(child);
            pending.extend(sibling);
            self.map.remove(id);
            self.nodes.release(slot);
        }

        debug_assert_eq!(self.nodes.live(), 0);
        self.nodes.reset();
        self.root = None;
        self.len = 0;
    }
}

impl PairingHeap {
    fn from_map(map: IdMap) -> Self {
        Self {
            root: None,
            len: 0,
            nodes: NodeArena::default(),
            map,
            trees: Vec::new(),
        }
    }

    fn insert_new(&mut self, id: NodeId, key: f64) -> Result<Upsert, HeapError> {
        let slot = self.nodes.alloc_with(|_| Node {
            key,
            id,
            child: None,
            sibling: None,
            prev: None,
            parent: None,
        })?;
        self.map.set(id, slot);
        self.root = Some(match self.root {
            Some(root) => self.merge(root, slot),
            None => slot,
        });
        self.len += 1;
        Ok(Upsert::Inserted)
    }

    fn lower_key(&mut self, x: Slot, new_key: f64) -> Upsert {
        if new_key >= self.nodes[x].key {
            return Upsert::Unchanged;
        }
        self.nodes[x].key = new_key;

        // The root only needs its key updated
        if let Some(root) = self.root {
            if root != x {
                self.detach(x);
                self.root = Some(self.merge(root, x));
            }
        }
        Upsert::Decreased
    }

    /// Links two roots: the one with the larger key becomes the first child of
    /// the other. On ties `a` stays on top.
    fn merge(&mut self, a: Slot, b: Slot) -> Slot {
        let (top, below) = if self.nodes[b].key < self.nodes[a].key {
            (b, a)
        } else {
            (a, b)
        };

        let first = self.nodes[top].child;
        if let Some(first) = first {
            self.nodes[first].prev = Some(below);
        }
        let node = &mut self.nodes[below];
        node.sibling = first;
        node.prev = None;
        node.parent = Some(top);
        self.nodes[top].child = Some(below);
        top
    }

    /// Removes a non-root node, with its subtree, from its parent's child list.
    fn detach(&mut self, x: Slot) {
        let Node {
            sibling,
            prev,
            parent,
            ..
        } = self.nodes[x];

        match prev {
            Some(prev) => self.nodes[prev].sibling = sibling,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent].child = sibling;
                }
            }
        }
        if let Some(sibling) = sibling {
            self.nodes[sibling].prev = prev;
        }

        let node = &mut self.nodes[x];
        node.sibling = None;
        node.prev = None;
        node.parent = None;
    }

    /// Multi-pass combine: pair adjacent trees left to right, then repeat on
    /// the results (carrying an odd tree over) until one tree is left.
    fn combine(&mut self, trees: &mut Vec<Slot>) -> Link {
        while trees.len() > 1 {
            let mut write = 0;
            let mut read = 0;
            while read + 1 < trees.len() {
                trees[write] = self.merge(trees[read], trees[read + 1]);
                write += 1;
                read += 2;
            }
            if read < trees.len() {
                trees[write] = trees[read];
                write += 1;
            }
            trees.truncate(write);
        }
        trees.pop()
    }
}
