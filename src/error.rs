//! Error types for the shortest-path drivers

use crate::traits::{HeapError, NodeId};

/// Errors returned by the shortest-path drivers
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Heap(#[from] HeapError),

    #[error("source node {node} out of range ({num_nodes} nodes)")]
    SourceOutOfRange { node: NodeId, num_nodes: usize },

    #[error("target node {node} out of range ({num_nodes} nodes)")]
    TargetOutOfRange { node: NodeId, num_nodes: usize },

    #[error("unknown heap kind {0:?} (expected fib or pair)")]
    UnknownHeapKind(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_errors_convert() {
        let err: Error = HeapError::InvalidKey(f64::NAN).into();
        assert!(matches!(err, Error::Heap(HeapError::InvalidKey(_))));
        assert_eq!(err.to_string(), "invalid key NaN");
    }

    #[test]
    fn test_messages() {
        let err = Error::SourceOutOfRange {
            node: 10,
            num_nodes: 3,
        };
        assert_eq!(err.to_string(), "source node 10 out of range (3 nodes)");
        assert_eq!(
            Error::UnknownHeapKind("binary".into()).to_string(),
            "unknown heap kind \"binary\" (expected fib or pair)"
        );
    }
}
