//! Decrease-key heaps and single-source shortest paths
//!
//! This crate provides two priority queues with efficient `decrease_key`
//! support and a Dijkstra driver that runs on either of them.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert and decrease_key; O(log n) amortized delete-min
//! - **Pairing Heap**: O(1) amortized insert; O(log n) amortized delete-min; o(log n) amortized decrease_key
//! - **Dijkstra**: dense distance vector from one source, generic over [`DecreaseKeyHeap`]
//! - **Bidirectional Dijkstra**: single-pair queries over forward and reverse adjacency
//!
//! Both heaps address elements by a dense integer id (`0..capacity`) and keep
//! their nodes in an index arena, so there are no handles to carry around and
//! no unsafe code.
//!
//! # Example
//!
//! ```rust
//! use sssp_heaps::{run_sssp, Graph, HeapKind};
//!
//! let graph = Graph::from_arcs(
//!     5,
//!     [(0, 1, 4.0), (0, 2, 1.0), (2, 1, 2.0), (1, 3, 1.0), (2, 3, 5.0), (3, 4, 3.0)],
//! );
//!
//! let fib = run_sssp(&graph, 0, HeapKind::Fibonacci).unwrap();
//! let pair = run_sssp(&graph, 0, HeapKind::Pairing).unwrap();
//! assert_eq!(fib, vec![0.0, 3.0, 1.0, 4.0, 7.0]);
//! assert_eq!(fib, pair);
//! ```

mod arena;
pub mod bidirectional;
pub mod binary;
pub mod dijkstra;
pub mod error;
pub mod fibonacci;
pub mod graph;
pub mod pairing;
pub mod traits;

// Re-export the main types for convenience
pub use bidirectional::{bidirectional_distance, BidirectionalResult};
pub use dijkstra::{run_sssp, shortest_distance, SearchStats, UNREACHABLE};
pub use error::{Error, Result};
pub use fibonacci::FibonacciHeap;
pub use graph::{Edge, Graph};
pub use pairing::PairingHeap;
pub use traits::{DecreaseKeyHeap, HeapError, HeapKind, NodeId, Upsert};
