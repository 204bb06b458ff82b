//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized delete_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list (the root ring) and every child list is a
//! ring of its own. The heap maintains the minimum root.
//!
//! Nodes live in a [`NodeArena`] and point at each other through slot indices,
//! so every structural edit is an O(1) index update and teardown never has to
//! chase pointers.
//!
//! # Cascading cuts
//!
//! A non-root node is marked the first time it loses a child. The second loss
//! cuts it to the root ring, and the same rule is applied to its former parent.
//! This is what bounds tree degrees by O(log n) while keeping decrease_key O(1)
//! amortized.

use crate::arena::{IdMap, Link, NodeArena, Slot};
use crate::traits::{check_key, DecreaseKeyHeap, HeapError, NodeId, Upsert};
use smallvec::SmallVec;

/// ln(φ): tree degree in a Fibonacci heap of n nodes is at most log_φ(n).
const LN_GOLDEN_RATIO: f64 = 0.481_211_825_059_603_4;

/// Degree table kept inline during consolidation. log_φ(2^32) < 47, so with
/// u32 slots the table never spills to the heap.
type DegreeTable = SmallVec<[Link; 64]>;

#[derive(Debug, Clone, Copy)]
struct Node {
    key: f64,
    id: NodeId,
    degree: u32,
    marked: bool,
    parent: Link,
    child: Link,
    left: Slot,
    right: Slot,
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use sssp_heaps::fibonacci::FibonacciHeap;
/// use sssp_heaps::DecreaseKeyHeap;
///
/// let mut heap = FibonacciHeap::with_capacity(4);
/// heap.insert(5.0, 0).unwrap();
/// heap.insert(3.0, 1).unwrap();
/// heap.decrease_key(0, 1.0).unwrap();
/// assert_eq!(heap.peek(), Some((1.0, 0)));
/// ```
#[derive(Debug, Clone)]
pub struct FibonacciHeap {
    min: Link,
    len: usize,
    nodes: NodeArena<Node>,
    map: IdMap,
    // Reused by consolidate() to snapshot the root ring
    roots: Vec<Slot>,
}

impl DecreaseKeyHeap for FibonacciHeap {
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
        self.min.is_none()
    }

    fn contains(&self, id: NodeId) -> bool {
        self.map.get(id).is_some()
    }

    fn key_of(&self, id: NodeId) -> Option<f64> {
        self.map.get(id).map(|slot| self.nodes[slot].key)
    }

    fn peek(&self) -> Option<(f64, NodeId)> {
        self.min.map(|slot| {
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
        let z = self.min?;

        // Promote all children of the minimum to the root ring
        if let Some(first) = self.nodes[z].child.take() {
            let mut current = first;
            loop {
                let next = self.nodes[current].right;
                self.nodes[current].parent = None;
                self.nodes[current].marked = false;
                self.add_root(current);

                if next == first {
                    break;
                }
                current = next;
            }
            self.nodes[z].degree = 0;
        }

        // Remove z from the root ring
        let right = self.nodes[z].right;
        if right == z {
            self.min = None;
        } else {
            self.unlink(z);
            self.min = Some(right);
            self.consolidate();
        }

        let Node { key, id, .. } = self.nodes[z];
        self.map.remove(id);
        self.nodes.release(z);
        self.len -= 1;
        Some((key, id))
    }

    fn clear(&mut self) {
        let mut rings: Vec<Slot> = Vec::new();
        rings.extend(self.min);

        while let Some(start) = rings.pop() {
            let mut current = start;
            loop {
                let Node {
                    id, child, right, ..
                } = self.nodes[current];
                rings.extend(child);
                self.map.remove(id);
                self.nodes.release(current);

                current = right;
                if current == start {
                    break;
                }
            }
        }

        debug_assert_eq!(self.nodes.live(), 0);
        self.nodes.reset();
        self.min = None;
        self.len = 0;
    }
}

impl FibonacciHeap {
    fn from_map(map: IdMap) -> Self {
        Self {
            min: None,
            len: 0,
            nodes: NodeArena::default(),
            map,
            roots: Vec::new(),
        }
    }

    fn insert_new(&mut self, id: NodeId, key: f64) -> Result<Upsert, HeapError> {
        let slot = self.nodes.alloc_with(|me| Node {
            key,
            id,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: me,
            right: me,
        })?;
        self.map.set(id, slot);
        self.add_root(slot);
        self.update_min(slot);
        self.len += 1;
        Ok(Upsert::Inserted)
    }

    fn lower_key(&mut self, x: Slot, new_key: f64) -> Upsert {
        if new_key >= self.nodes[x].key {
            return Upsert::Unchanged;
        }
        self.nodes[x].key = new_key;

        if let Some(parent) = self.nodes[x].parent {
            if new_key < self.nodes[parent].key {
                self.cut(x, parent);
                self.cascading_cut(parent);
            }
        }

        self.update_min(x);
        Upsert::Decreased
    }

    #[inline]
    fn update_min(&mut self, x: Slot) {
        match self.min {
            Some(min) if self.nodes[x].key < self.nodes[min].key => self.min = Some(x),
            None => self.min = Some(x),
            _ => {}
        }
    }

    /// Splices `x` into the root ring right after the minimum.
    fn add_root(&mut self, x: Slot) {
        match self.min {
            None => {
                self.nodes[x].left = x;
                self.nodes[x].right = x;
                self.min = Some(x);
            }
            Some(min) => {
                let min_right = self.nodes[min].right;
                self.nodes[x].left = min;
                self.nodes[x].right = min_right;
                self.nodes[min_right].left = x;
                self.nodes[min].right = x;
            }
        }
    }

    /// Joins the neighbours of `x` in its ring. `x` keeps its own links.
    fn unlink(&mut self, x: Slot) {
        let Node { left, right, .. } = self.nodes[x];
        self.nodes[left].right = right;
        self.nodes[right].left = left;
    }

    /// Consolidates the root ring so that no two roots share a degree
    fn consolidate(&mut self) {
        let Some(start) = self.min else {
            return;
        };

        let mut roots = std::mem::take(&mut self.roots);
        roots.clear();
        let mut current = start;
        loop {
            roots.push(current);
            current = self.nodes[current].right;
            if current == start {
                break;
            }
        }

        let bound = ((self.len.max(1) as f64).ln() / LN_GOLDEN_RATIO) as usize + 2;
        let mut by_degree = DegreeTable::new();
        by_degree.resize(bound, None);

        for &root in &roots {
            let mut x = root;
            let mut d = self.nodes[x].degree as usize;

            loop {
                if d >= by_degree.len() {
                    by_degree.resize(d + 1, None);
                }
                let Some(mut y) = by_degree[d].take() else {
                    break;
                };

                // Smaller key becomes the parent; on ties x stays the parent
                if self.nodes[y].key < self.nodes[x].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                d += 1;
            }

            by_degree[d] = Some(x);
        }

        // Rebuild the root ring and find the new minimum
        self.min = None;
        for root in by_degree.into_iter().flatten() {
            self.add_root(root);
            self.update_min(root);
        }

        self.roots = roots;
    }

    /// Makes root `y` a child of root `x`. The root ring itself is rebuilt by
    /// the caller, so `y` is not unlinked from it here.
    fn link(&mut self, y: Slot, x: Slot) {
        self.nodes[y].parent = Some(x);
        self.nodes[y].marked = false;

        match self.nodes[x].child {
            None => {
                self.nodes[y].left = y;
                self.nodes[y].right = y;
                self.nodes[x].child = Some(y);
            }
            Some(child) => {
                let child_right = self.nodes[child].right;
                self.nodes[y].left = child;
                self.nodes[y].right = child_right;
                self.nodes[child_right].left = y;
                self.nodes[child].right = y;
            }
        }

        self.nodes[x].degree += 1;
    }

    /// Cuts `x` from its parent `parent` and moves it to the root ring
    fn cut(&mut self, x: Slot, parent: Slot) {
        let right = self.nodes[x].right;
        if right == x {
            self.nodes[parent].child = None;
        } else {
            if self.nodes[parent].child == Some(x) {
                self.nodes[parent].child = Some(right);
            }
            self.unlink(x);
        }
        self.nodes[parent].degree -= 1;

        self.nodes[x].parent = None;
        self.nodes[x].marked = false;
        self.add_root(x);
    }

    /// Walks up from `y`, cutting marked ancestors until an unmarked one
    /// (which gets marked) or a root is reached.
    fn cascading_cut(&mut self, mut y: Slot) {
        while let Some(parent) = self.nodes[y].parent {
            if !self.nodes[y].marked {
                self.nodes[y].marked = true;
                return;
            }
            self.cut(y, parent);
            y = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    impl FibonacciHeap {
        fn ring(&self, start: Slot) -> Vec<Slot> {
            let mut out = Vec::new();
            let mut current = start;
            loop {
                let right = self.nodes[current].right;
                assert_eq!(self.nodes[right].left, current, "broken ring link");
                out.push(current);
                current = right;
                if current == start {
                    break;
                }
                assert!(out.len() <= self.len, "ring does not close");
            }
            out
        }

        fn check_invariants(&self) {
            let mut seen = 0;
            if let Some(min) = self.min {
                let roots = self.ring(min);
                for &r in &roots {
                    let node = &self.nodes[r];
                    assert!(node.parent.is_none());
                    assert!(!node.marked, "roots are never marked");
                    assert!(self.nodes[min].key <= node.key);
                }

                let mut stack = roots;
                while let Some(x) = stack.pop() {
                    seen += 1;
                    let node = self.nodes[x];
                    assert_eq!(self.map.get(node.id), Some(x));

                    let mut degree = 0;
                    if let Some(child) = node.child {
                        for y in self.ring(child) {
                            degree += 1;
                            assert_eq!(self.nodes[y].parent, Some(x));
                            assert!(self.nodes[y].key >= node.key, "heap order");
                            stack.push(y);
                        }
                    }
                    assert_eq!(degree, node.degree);
                }
            }
            assert_eq!(seen, self.len);
            assert_eq!(self.nodes.live(), self.len);
            let mapped = (0..self.capacity()).filter(|&id| self.contains(id)).count();
            assert_eq!(mapped, self.len);
        }

        fn depth(&self, id: NodeId) -> usize {
            let mut depth = 0;
            let mut current = self.map.get(id).unwrap();
            while let Some(parent) = self.nodes[current].parent {
                depth += 1;
                current = parent;
            }
            depth
        }

        fn is_marked(&self, id: NodeId) -> bool {
            self.nodes[self.map.get(id).unwrap()].marked
        }

        fn parent_id(&self, id: NodeId) -> Option<NodeId> {
            let slot = self.map.get(id)?;
            self.nodes[slot].parent.map(|p| self.nodes[p].id)
        }

        fn children_ids(&self, id: NodeId) -> Vec<NodeId> {
            let slot = self.map.get(id).unwrap();
            match self.nodes[slot].child {
                Some(child) => self.ring(child).iter().map(|&s| self.nodes[s].id).collect(),
                None => Vec::new(),
            }
        }
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::with_capacity(8);
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.insert(5.0, 0).unwrap();
        heap.insert(3.0, 1).unwrap();
        heap.insert(7.0, 2).unwrap();

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Some((3.0, 1)));

        assert_eq!(heap.pop(), Some((3.0, 1)));
        assert_eq!(heap.peek(), Some((5.0, 0)));
        heap.check_invariants();
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = FibonacciHeap::with_capacity(8);
        heap.insert(10.0, 0).unwrap();
        heap.insert(20.0, 1).unwrap();
        heap.insert(30.0, 2).unwrap();

        assert_eq!(heap.peek(), Some((10.0, 0)));

        assert_eq!(heap.decrease_key(1, 5.0), Ok(Upsert::Decreased));
        assert_eq!(heap.peek(), Some((5.0, 1)));

        assert_eq!(heap.decrease_key(2, 1.0), Ok(Upsert::Decreased));
        assert_eq!(heap.peek(), Some((1.0, 2)));
        heap.check_invariants();
    }

    #[test]
    fn test_insert_existing_acts_as_decrease_key() {
        let mut heap = FibonacciHeap::with_capacity(4);
        assert_eq!(heap.insert(10.0, 3), Ok(Upsert::Inserted));
        assert_eq!(heap.insert(4.0, 3), Ok(Upsert::Decreased));
        assert_eq!(heap.insert(8.0, 3), Ok(Upsert::Unchanged));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.key_of(3), Some(4.0));
    }

    #[test]
    fn test_rejected_operations_leave_heap_untouched() {
        let mut heap = FibonacciHeap::with_capacity(4);
        heap.insert(1.0, 0).unwrap();

        assert_eq!(
            heap.insert(2.0, 4),
            Err(HeapError::NodeOutOfRange { id: 4, capacity: 4 })
        );
        assert!(matches!(heap.decrease_key(0, f64::NAN), Err(HeapError::InvalidKey(_))));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.key_of(0), Some(1.0));
        heap.check_invariants();
    }

    #[test]
    fn test_consolidation_builds_trees() {
        let mut heap = FibonacciHeap::with_capacity(32);
        for id in 0..17 {
            heap.insert(id as f64, id).unwrap();
        }
        assert_eq!(heap.pop(), Some((0.0, 0)));
        heap.check_invariants();

        // 16 roots consolidate into a single binomial-shaped tree of degree 4
        let (_, min_id) = heap.peek().unwrap();
        assert_eq!(min_id, 1);
        assert_eq!(heap.children_ids(1).len(), 4);
        assert!((2..17).all(|id| heap.depth(id) >= 1));
    }

    #[test]
    fn test_consolidation_of_many_roots() {
        let n = 50_000;
        let mut heap = FibonacciHeap::with_capacity(n);
        for id in 0..n {
            heap.insert(((id * 7919) % n) as f64, id).unwrap();
        }
        assert_eq!(heap.pop().map(|(key, _)| key), Some(0.0));
        heap.check_invariants();

        // Every degree fits the inline table
        let max_degree = (0..n)
            .filter(|&id| heap.contains(id))
            .map(|id| heap.children_ids(id).len())
            .max()
            .unwrap();
        assert!(max_degree < 64);

        let mut last = 0.0;
        let mut count = 1;
        while let Some((key, _)) = heap.pop() {
            assert!(key >= last);
            last = key;
            count += 1;
        }
        assert_eq!(count, n);
    }

    #[test]
    fn test_cut_marks_parent_and_second_cut_cascades() {
        let mut heap = FibonacciHeap::with_capacity(32);
        for id in 0..17 {
            heap.insert(id as f64, id).unwrap();
        }
        heap.pop();
        heap.check_invariants();

        // Find a node at depth 2 that has at least two children
        let grand = (2..17)
            .find(|&id| heap.depth(id) == 1 && heap.children_ids(id).len() >= 2)
            .expect("a degree >= 2 child of the root exists");
        let children = heap.children_ids(grand);

        heap.decrease_key(children[0], -1.0).unwrap();
        heap.check_invariants();
        assert_eq!(heap.depth(children[0]), 0);
        assert!(heap.is_marked(grand), "first child loss marks the parent");
        assert_eq!(heap.parent_id(grand), Some(1));

        heap.decrease_key(children[1], -2.0).unwrap();
        heap.check_invariants();
        assert_eq!(heap.depth(children[1]), 0);
        assert_eq!(heap.depth(grand), 0, "second child loss cuts the parent");
        assert!(!heap.is_marked(grand));
        assert_eq!(heap.peek(), Some((-2.0, children[1])));
    }

    #[test]
    fn test_decrease_key_without_violation_keeps_structure() {
        let mut heap = FibonacciHeap::with_capacity(8);
        for id in 0..5 {
            heap.insert(id as f64 * 10.0, id).unwrap();
        }
        heap.pop();
        let child = (1..5).find(|&id| heap.depth(id) > 0).unwrap();
        let parent = heap.parent_id(child).unwrap();
        let parent_key = heap.key_of(parent).unwrap();

        // Still larger than its parent: no cut
        heap.decrease_key(child, parent_key + 0.5).unwrap();
        assert_eq!(heap.parent_id(child), Some(parent));
        heap.check_invariants();
    }

    #[test]
    fn test_empty_pop_is_idempotent() {
        let mut heap = FibonacciHeap::with_capacity(0);
        for _ in 0..3 {
            assert_eq!(heap.pop(), None);
            assert_eq!(heap.extract_min(), None);
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut heap = FibonacciHeap::with_capacity(64);
        for id in 0..64 {
            heap.insert((64 - id) as f64, id).unwrap();
        }
        heap.pop();
        heap.decrease_key(40, -5.0).unwrap();
        heap.clear();

        assert!(heap.is_empty());
        assert_eq!(heap.nodes.live(), 0);
        assert!((0..64).all(|id| !heap.contains(id)));
        heap.check_invariants();

        heap.insert(1.0, 7).unwrap();
        assert_eq!(heap.pop(), Some((1.0, 7)));
    }

    #[test]
    fn test_reinsert_after_extract() {
        let mut heap = FibonacciHeap::with_capacity(4);
        heap.insert(1.0, 2).unwrap();
        assert_eq!(heap.extract_min(), Some(2));
        assert!(!heap.contains(2));
        assert_eq!(heap.insert(5.0, 2), Ok(Upsert::Inserted));
        assert_eq!(heap.extract_min(), Some(2));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Upsert(usize, i32),
        Pop,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (0usize..40, -500i32..500).prop_map(|(id, key)| Op::Upsert(id, key)),
            1 => Just(Op::Pop),
        ]
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_under_random_ops(ops in prop::collection::vec(op_strategy(), 1..300)) {
            let mut heap = FibonacciHeap::with_capacity(40);
            let mut model: HashMap<usize, f64> = HashMap::new();

            for op in ops {
                match op {
                    Op::Upsert(id, key) => {
                        let key = key as f64;
                        let outcome = heap.upsert(id, key).unwrap();
                        match model.get(&id).copied() {
                            None => {
                                prop_assert_eq!(outcome, Upsert::Inserted);
                                model.insert(id, key);
                            }
                            Some(old) if key < old => {
                                prop_assert_eq!(outcome, Upsert::Decreased);
                                model.insert(id, key);
                            }
                            Some(_) => prop_assert_eq!(outcome, Upsert::Unchanged),
                        }
                    }
                    Op::Pop => {
                        let expected = model.values().copied().fold(f64::INFINITY, f64::min);
                        match heap.pop() {
                            Some((key, id)) => {
                                prop_assert_eq!(key, expected);
                                prop_assert_eq!(model.remove(&id), Some(key));
                            }
                            None => prop_assert!(model.is_empty()),
                        }
                    }
                }
                heap.check_invariants();
                prop_assert_eq!(heap.len(), model.len());
            }
        }
    }
}
