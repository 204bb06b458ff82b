//! Dijkstra's single-source shortest paths over the decrease-key heaps
//!
//! The driver is generic over [`DecreaseKeyHeap`]: only node ids are stored in
//! the heap, keyed by their tentative distance, and the distance vector is the
//! single source of truth. Relaxation calls `decrease_key`, which inserts ids
//! that are not queued yet, so the loop needs no "open set" bookkeeping.
//!
//! # Example
//!
//! ```rust
//! use sssp_heaps::dijkstra::{dijkstra, UNREACHABLE};
//! use sssp_heaps::pairing::PairingHeap;
//! use sssp_heaps::Graph;
//!
//! let graph = Graph::from_arcs(3, [(0, 1, 2.0), (1, 0, 1.0)]);
//! let dist = dijkstra::<PairingHeap>(&graph, 0).unwrap();
//! assert_eq!(dist, vec![0.0, 2.0, UNREACHABLE]);
//! ```

use crate::error::{Error, Result};
use crate::fibonacci::FibonacciHeap;
use crate::graph::Graph;
use crate::pairing::PairingHeap;
use crate::traits::{DecreaseKeyHeap, HeapKind, NodeId, Upsert};

/// Distance reported for nodes the source cannot reach.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes extracted from the heap (their distance is final)
    pub settled: usize,
    /// Edges scanned out of settled nodes
    pub relaxed: usize,
    /// Ids that entered the heap
    pub inserted: usize,
    /// Successful key decreases of queued ids
    pub decreased: usize,
}

/// Computes the distance from `source` to every node of `graph`.
///
/// Unreached nodes are [`UNREACHABLE`].
///
/// # Time Complexity
/// O(m + n log n) with [`FibonacciHeap`].
pub fn dijkstra<H: DecreaseKeyHeap>(graph: &Graph, source: NodeId) -> Result<Vec<f64>> {
    dijkstra_with_stats::<H>(graph, source).map(|(dist, _)| dist)
}

/// Like [`dijkstra`], and also reports what the search did.
pub fn dijkstra_with_stats<H: DecreaseKeyHeap>(
    graph: &Graph,
    source: NodeId,
) -> Result<(Vec<f64>, SearchStats)> {
    let n = graph.num_nodes();
    if source >= n {
        return Err(Error::SourceOutOfRange {
            node: source,
            num_nodes: n,
        });
    }

    let mut heap = H::try_with_capacity(n)?;
    let mut dist = vec![UNREACHABLE; n];
    let mut stats = SearchStats::default();

    dist[source] = 0.0;
    heap.insert(0.0, source)?;
    stats.inserted += 1;

    while let Some((_, u)) = heap.pop() {
        stats.settled += 1;
        let du = dist[u];

        for edge in graph.edges(u) {
            stats.relaxed += 1;
            let candidate = du + edge.weight;
            if candidate < dist[edge.to] {
                dist[edge.to] = candidate;
                match heap.decrease_key(edge.to, candidate)? {
                    Upsert::Inserted => stats.inserted += 1,
                    Upsert::Decreased => stats.decreased += 1,
                    Upsert::Unchanged => {}
                }
            }
        }
    }

    log::debug!(
        "dijkstra from {}: settled {}, relaxed {}, inserted {}, decreased {}",
        source,
        stats.settled,
        stats.relaxed,
        stats.inserted,
        stats.decreased
    );

    Ok((dist, stats))
}

/// Runs [`dijkstra`] with the backend selected at runtime.
pub fn run_sssp(graph: &Graph, source: NodeId, kind: HeapKind) -> Result<Vec<f64>> {
    match kind {
        HeapKind::Fibonacci => dijkstra::<FibonacciHeap>(graph, source),
        HeapKind::Pairing => dijkstra::<PairingHeap>(graph, source),
    }
}

/// Distance from `source` to `target`. A node's distance to itself is 0 and
/// is answered without running a search.
pub fn shortest_distance(
    graph: &Graph,
    source: NodeId,
    target: NodeId,
    kind: HeapKind,
) -> Result<f64> {
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
        return Ok(0.0);
    }

    let dist = run_sssp(graph, source, kind)?;
    Ok(dist[target])
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
    fn test_sample_graph_both_backends() {
        let graph = sample_graph();
        for kind in HeapKind::ALL {
            assert_eq!(
                run_sssp(&graph, 0, kind).unwrap(),
                vec![0.0, 3.0, 1.0, 4.0, 7.0],
                "{kind}"
            );
        }
    }

    #[test]
    fn test_stats() {
        let graph = sample_graph();
        let (_, stats) = dijkstra_with_stats::<FibonacciHeap>(&graph, 0).unwrap();
        assert_eq!(stats.settled, 5);
        assert_eq!(stats.relaxed, 6);
        assert_eq!(stats.inserted, 5);
        // 1 improves from 4 to 3 via 2, then 3 from 6 to 4 via 1
        assert_eq!(stats.decreased, 2);
    }

    #[test]
    fn test_source_out_of_range() {
        let graph = sample_graph();
        assert_eq!(
            run_sssp(&graph, 5, HeapKind::Pairing),
            Err(Error::SourceOutOfRange {
                node: 5,
                num_nodes: 5
            })
        );
        assert!(matches!(
            shortest_distance(&graph, 0, 9, HeapKind::Fibonacci),
            Err(Error::TargetOutOfRange { node: 9, .. })
        ));
    }

    #[test]
    fn test_shortest_distance() {
        let graph = sample_graph();
        assert_eq!(shortest_distance(&graph, 0, 4, HeapKind::Fibonacci).unwrap(), 7.0);
        assert_eq!(shortest_distance(&graph, 3, 3, HeapKind::Pairing).unwrap(), 0.0);
        assert_eq!(
            shortest_distance(&graph, 4, 0, HeapKind::Pairing).unwrap(),
            UNREACHABLE
        );
    }

    #[test]
    fn test_zero_weight_edges() {
        let graph = Graph::from_arcs(3, [(0, 1, 0.0), (1, 2, 0.0), (2, 0, 0.0)]);
        assert_eq!(
            dijkstra::<PairingHeap>(&graph, 1).unwrap(),
            vec![0.0, 0.0, 0.0]
        );
    }
}
