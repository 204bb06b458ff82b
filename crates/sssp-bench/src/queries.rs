//! Query files: whitespace-separated `source target` pairs with 1-based ids

use crate::error::{BenchError, Result};
use sssp_heaps::{Graph, NodeId};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A single-pair query with 0-based ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Query {
    pub source: NodeId,
    pub target: NodeId,
}

impl Query {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// True if both endpoints are nodes of `graph`.
    pub fn fits(&self, graph: &Graph) -> bool {
        graph.contains_node(self.source) && graph.contains_node(self.target)
    }
}

/// Formats the query the way query files store it (1-based).
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.source + 1, self.target + 1)
    }
}

/// Outcome of [`validate_query_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Validation {
    pub valid: usize,
    pub total: usize,
}

pub fn load_queries<P: AsRef<Path>>(path: P) -> Result<Vec<Query>> {
    let file = File::open(path)?;
    read_queries(BufReader::new(file))
}

/// Parses query pairs. Pairs may span lines; a trailing unpaired id is
/// ignored with a warning.
pub fn read_queries<R: BufRead>(reader: R) -> Result<Vec<Query>> {
    let mut queries = Vec::new();
    let mut pending: Option<NodeId> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            let id = parse_id(token).ok_or_else(|| BenchError::InvalidNodeId {
                line: index + 1,
                token: token.to_string(),
            })?;
            match pending.take() {
                Some(source) => queries.push(Query::new(source, id)),
                None => pending = Some(id),
            }
        }
    }

    if let Some(id) = pending {
        log::warn!("ignoring unpaired node id {} at end of query file", id + 1);
    }
    Ok(queries)
}

fn parse_id(token: &str) -> Option<NodeId> {
    token.parse::<NodeId>().ok()?.checked_sub(1)
}

/// Counts the pairs of a query file whose ids are nodes of `graph`.
pub fn validate_query_file<P: AsRef<Path>>(path: P, graph: &Graph) -> Result<Validation> {
    let path = path.as_ref();
    let queries = load_queries(path)?;

    let mut valid = 0;
    for (index, query) in queries.iter().enumerate() {
        if query.fits(graph) {
            valid += 1;
        } else {
            log::warn!(
                "invalid node ids in query {}: {} (graph has {} nodes)",
                index + 1,
                query,
                graph.num_nodes()
            );
        }
    }

    log::info!(
        "Query file {}: {}/{} valid pairs",
        path.display(),
        valid,
        queries.len()
    );
    Ok(Validation {
        valid,
        total: queries.len(),
    })
}
