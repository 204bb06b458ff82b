//! Directed weighted graph over dense node ids
//!
//! The graph stores forward adjacency lists (used by [`dijkstra`](crate::dijkstra))
//! and reverse adjacency lists (used only by the
//! [bidirectional search](crate::bidirectional)). It is built once and only
//! read by the algorithms.
//!
//! # Example
//!
//! ```rust
//! use sssp_heaps::Graph;
//!
//! let mut graph = Graph::new(3);
//! assert!(graph.add_arc(0, 1, 2.5));
//! assert!(graph.add_arc(1, 2, 1.0));
//! assert!(!graph.add_arc(2, 7, 1.0)); // out of range, ignored
//!
//! assert_eq!(graph.num_edges(), 2);
//! assert_eq!(graph.out_degree(0), 1);
//! assert_eq!(graph.reverse_edges(2)[0].to, 1);
//! ```

use crate::traits::NodeId;
use std::ops::Range;

/// A weighted edge. In a reverse list, `to` is the tail of the original arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    pub weight: f64,
}

/// Directed multigraph with non-negative `f64` weights
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adj: Vec<Vec<Edge>>,
    rev_adj: Vec<Vec<Edge>>,
    num_edges: usize,
}

impl Graph {
    /// Creates a graph with `num_nodes` nodes and no edges.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            adj: vec![Vec::new(); num_nodes],
            rev_adj: vec![Vec::new(); num_nodes],
            num_edges: 0,
        }
    }

    /// Builds a graph from `(from, to, weight)` arcs, skipping invalid ones.
    pub fn from_arcs<I>(num_nodes: usize, arcs: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64)>,
    {
        let mut graph = Self::new(num_nodes);
        for (from, to, weight) in arcs {
            graph.add_arc(from, to, weight);
        }
        graph
    }

    /// Appends the forward edge `from → to` only.
    ///
    /// Returns `false` (and leaves the graph unchanged) if either endpoint is
    /// out of range or the weight is negative or NaN.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> bool {
        if !self.accepts(from, to, weight) {
            return false;
        }
        self.adj[from].push(Edge { to, weight });
        self.num_edges += 1;
        true
    }

    /// Appends `from → to` to the forward lists and its mirror to the reverse
    /// lists. Counts as a single edge. Same validation as [`add_edge`](Self::add_edge).
    pub fn add_arc(&mut self, from: NodeId, to: NodeId, weight: f64) -> bool {
        if !self.add_edge(from, to, weight) {
            return false;
        }
        self.rev_adj[to].push(Edge { to: from, weight });
        true
    }

    fn accepts(&self, from: NodeId, to: NodeId, weight: f64) -> bool {
        let n = self.num_nodes();
        if from >= n || to >= n {
            log::trace!("ignoring edge {} -> {}: node out of range ({} nodes)", from, to, n);
            return false;
        }
        if weight.is_nan() || weight < 0.0 {
            log::trace!("ignoring edge {} -> {}: invalid weight {}", from, to, weight);
            return false;
        }
        true
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.adj.len()
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node < self.num_nodes()
    }

    /// Outgoing edges of `node` in insertion order. Empty for unknown nodes.
    #[inline]
    pub fn edges(&self, node: NodeId) -> &[Edge] {
        self.adj.get(node).map_or(&[], Vec::as_slice)
    }

    /// Incoming edges of `node`, each pointing back at its tail.
    #[inline]
    pub fn reverse_edges(&self, node: NodeId) -> &[Edge] {
        self.rev_adj.get(node).map_or(&[], Vec::as_slice)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.edges(node).len()
    }

    pub fn nodes(&self) -> Range<NodeId> {
        0..self.num_nodes()
    }
}
