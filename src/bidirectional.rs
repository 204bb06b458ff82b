//! Bidirectional Dijkstra for single-pair queries
//!
//! Two searches run in lockstep: forward from the source over the outgoing
//! edges, backward from the target over the reverse lists built by
//! [`Graph::add_arc`]. Each side uses a lazy [`BinaryHeap`]: improved
//! distances are pushed again and stale entries are skipped when popped.
//!
//! Whenever a relaxation reaches a node the other side has already reached,
//! the combined length is a candidate for the best path. The search stops once
//! the two smallest frontier keys together cannot beat that candidate.

use crate::binary::BinaryHeap;
use crate::dijkstra::UNREACHABLE;
use crate::error::{Error, Result};
use crate::graph::{Edge, Graph};
use crate::traits::NodeId;

/// Outcome of a bidirectional query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BidirectionalResult {
    /// Shortest distance, or [`UNREACHABLE`]
    pub distance: f64,
    /// Nodes settled by the forward search
    pub forward_settled: usize,
    /// Nodes settled by the backward search
    pub backward_settled: usize,
}

/// One direction of the search.
struct Frontier {
    dist: Vec<f64>,
    settled: Vec<bool>,
    heap: BinaryHeap,
    count: usize,
}

impl Frontier {
    fn new(n: usize, start: NodeId) -> Self {
        let mut dist = vec![UNREACHABLE; n];
        dist[start] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(0.0, start);
        Self {
            dist,
            settled: vec![false; n],
            heap,
            count: 0,
        }
    }

    /// Settles the next node and relaxes its edges, updating `best` with
    /// every meeting point found through `other`.
    fn step<'g>(
        &mut self,
        edges: impl Fn(NodeId) -> &'g [Edge],
        other: &[f64],
        best: &mut f64,
    ) {
        while let Some((key, u)) = self.heap.pop() {
            if key > self.dist[u] || self.settled[u] {
                continue;
            }
            self.settled[u] = true;
            self.count += 1;

            let du = self.dist[u];
            *best = best.min(du + other[u]);

            for edge in edges(u) {
                let candidate = du + edge.weight;
                if candidate < self.dist[edge.to] {
                    self.dist[edge.to] = candidate;
                    self.heap.push(candidate, edge.to);
                    *best = best.min(candidate + other[edge.to]);
                }
            }
            return;
        }
    }
}

/// Shortest distance from `source` to `target`, searching from both ends.
///
/// The graph must have been built with [`Graph::add_arc`] so that the reverse
/// lists mirror the forward ones.
pub fn bidirectional_distance(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
) -> Result<BidirectionalResult> {
    let n = graph.num_nodes();
    if source >= n {
        return Err(Error::SourceOutOfRange {
            node: source,
            num_nodes: n,
        });
    }
    if target >= n {
        return Err(Error::TargetOutOfRange {
            node: target,
            num_nodes: n,
        });
    }
    if source == target {
        return Ok(BidirectionalResult {
            distance: 0.0,
            forward_settled: 0,
            backward_settled: 0,
        });
    }

    let mut forward = Frontier::new(n, source);
    let mut backward = Frontier::new(n, target);
    let mut best = UNREACHABLE;

    while !forward.heap.is_empty() || !backward.heap.is_empty() {
        forward.step(|u| graph.edges(u), &backward.dist, &mut best);
        backward.step(|u| graph.reverse_edges(u), &forward.dist, &mut best);

        if forward.heap.top_key() + backward.heap.top_key() >= best {
            break;
        }
    }

    log::debug!(
        "bidirectional {} -> {}: distance {}, settled {} forward / {} backward",
        source,
        target,
        best,
        forward.count,
        backward.count
    );

    Ok(BidirectionalResult {
        distance: best,
        forward_settled: forward.count,
        backward_settled: backward.count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> Graph {
        Graph::from_arcs(
            5,
            [
                (0, 1, 4.0),
                (0, 2, 1.0),
                (2, 1, 2.0),
                (1, 3, 1.0),
                (2, 3, 5.0),
                (3, 4, 3.0),
            ],
        )
    }

    #[test]
    fn test_sample_distances() {
        let graph = sample_graph();
        let expected = [0.0, 3.0, 1.0, 4.0, 7.0];
        for (target, &want) in expected.iter().enumerate() {
            let result = bidirectional_distance(&graph, 0, target).unwrap();
            assert_eq!(result.distance, want, "target {target}");
        }
    }

    #[test]
    fn test_self_query() {
        let graph = sample_graph();
        let result = bidirectional_distance(&graph, 3, 3).unwrap();
        assert_eq!(result.distance, 0.0);
        assert_eq!(result.forward_settled, 0);
        assert_eq!(result.backward_settled, 0);
    }

    #[test]
    fn test_unreachable() {
        let graph = sample_graph();
        let result = bidirectional_distance(&graph, 4, 0).unwrap();
        assert_eq!(result.distance, UNREACHABLE);
    }

    #[test]
    fn test_out_of_range() {
        let graph = sample_graph();
        assert!(matches!(
            bidirectional_distance(&graph, 0, 5),
            Err(Error::TargetOutOfRange { .. })
        ));
    }

    #[test]
    fn test_long_path_stops_early() {
        // A path 0 -> 1 -> ... -> 99 plus a shortcut tail that is never useful
        let mut arcs: Vec<(usize, usize, f64)> = (0..99).map(|i| (i, i + 1, 1.0)).collect();
        arcs.extend((0..99).map(|i| (i, 99 - i, 1000.0)));
        let graph = Graph::from_arcs(100, arcs);

        let result = bidirectional_distance(&graph, 10, 20).unwrap();
        assert_eq!(result.distance, 10.0);
        assert!(result.forward_settled + result.backward_settled < 100);
    }
}
