//! Errors raised while reading graphs and query files or running queries

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line {line}: arc before the `p sp <nodes> <arcs>` header")]
    ArcBeforeHeader { line: usize },

    #[error("missing `p sp <nodes> <arcs>` header")]
    MissingHeader,

    #[error("line {line}: malformed {what}: {content:?}")]
    Malformed {
        line: usize,
        what: &'static str,
        content: String,
    },

    #[error("line {line}: node ids are 1-based, got {token:?}")]
    InvalidNodeId { line: usize, token: String },

    #[error(transparent)]
    Search(#[from] sssp_heaps::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
