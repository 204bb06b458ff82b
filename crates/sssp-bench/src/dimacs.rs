//! DIMACS shortest-path graph loader
//!
//! Reads the 9th DIMACS Implementation Challenge format:
//!
//! ```text
//! c comment
//! p sp <nodes> <arcs>
//! a <from> <to> <weight>
//! ```
//!
//! Node ids in the file are 1-based and converted to 0-based. Every arc is
//! added with [`Graph::add_arc`], so the reverse lists are populated as well.
//! Arcs whose endpoints fall outside `1..=nodes` are skipped.

use crate::error::{BenchError, Result};
use sssp_heaps::Graph;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Arcs between progress messages
const PROGRESS_INTERVAL: usize = 5_000_000;

/// Loads a DIMACS `.gr` file.
pub fn load_dimacs<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    log::info!("Reading DIMACS graph file: {}", path.display());
    let file = File::open(path)?;
    read_dimacs(BufReader::new(file))
}

/// Parses DIMACS text from any buffered reader.
pub fn read_dimacs<R: BufRead>(reader: R) -> Result<Graph> {
    let mut graph: Option<Graph> = None;
    let mut loaded = 0usize;
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();

        let mut parts = trimmed.split_whitespace();
        match parts.next() {
            None | Some("c") => {}
            Some("p") => {
                let header = parse_header(&mut parts).ok_or_else(|| BenchError::Malformed {
                    line: line_no,
                    what: "problem line",
                    content: trimmed.to_string(),
                })?;
                log::info!(
                    "Allocating graph with {} nodes ({} arcs expected)",
                    header.0,
                    header.1
                );
                graph = Some(Graph::new(header.0));
            }
            Some("a") => {
                let graph = graph
                    .as_mut()
                    .ok_or(BenchError::ArcBeforeHeader { line: line_no })?;
                let (from, to, weight) =
                    parse_arc(&mut parts).ok_or_else(|| BenchError::Malformed {
                        line: line_no,
                        what: "arc",
                        content: trimmed.to_string(),
                    })?;

                // 1-based to 0-based; id 0 maps out of range and is skipped
                let added = match (from.checked_sub(1), to.checked_sub(1)) {
                    (Some(from), Some(to)) => graph.add_arc(from, to, weight),
                    _ => false,
                };
                if added {
                    loaded += 1;
                    if loaded.is_multiple_of(PROGRESS_INTERVAL) {
                        log::info!("  Loaded {} arcs...", loaded);
                    }
                } else {
                    skipped += 1;
                }
            }
            // Other line types are not part of the shortest-path format
            Some(_) => {}
        }
    }

    let graph = graph.ok_or(BenchError::MissingHeader)?;
    log::info!(
        "Finished loading graph: {} nodes, {} arcs ({} skipped)",
        graph.num_nodes(),
        loaded,
        skipped
    );
    Ok(graph)
}

fn parse_header<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<(usize, usize)> {
    if parts.next()? != "sp" {
        return None;
    }
    let nodes = parts.next()?.parse().ok()?;
    let arcs = parts.next()?.parse().ok()?;
    Some((nodes, arcs))
}

fn parse_arc<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<(usize, usize, f64)> {
    let from = parts.next()?.parse().ok()?;
    let to = parts.next()?.parse().ok()?;
    let weight = parts.next()?.parse().ok()?;
    Some((from, to, weight))
}
