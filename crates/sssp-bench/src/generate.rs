//! Query-file generators
//!
//! Every generator writes one `.qry` file into the target folder and returns
//! its path together with the number of pairs written. Files use 1-based ids,
//! the same format [`load_queries`](crate::queries::load_queries) reads.

use crate::error::Result;
use crate::queries::Query;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sssp_heaps::Graph;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Seed of the complete-graph sample, fixed so that runs are comparable.
pub const COMPLETE_GRAPH_SEED: u64 = 12345;

/// Candidate pairs for the small test set (1-based, as stored in files).
/// Aimed at the USA road network; pairs outside the graph are dropped.
const PREDEFINED_PAIRS: [(usize, usize); 20] = [
    (1, 2),
    (2, 1),
    (1048577, 1048578),
    (1048578, 1048577),
    (2097153, 3),
    (3, 2097153),
    (4, 1048579),
    (1048579, 4),
    (2097154, 5),
    (5, 2097154),
    (6, 1048580),
    (1048580, 6),
    (1048581, 7),
    (7, 1048581),
    (7, 8),
    (8, 7),
    (1048582, 1048580),
    (1048580, 1048582),
    (7, 1048583),
    (1048583, 7),
];

/// A file written by one of the generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub path: PathBuf,
    pub pairs: usize,
}

fn write_queries(folder: &Path, name: &str, queries: &[Query]) -> Result<Generated> {
    let path = folder.join(name);
    let mut out = BufWriter::new(File::create(&path)?);
    for query in queries {
        writeln!(out, "{query}")?;
    }
    out.flush()?;

    log::info!("Generated {} ({} pairs)", path.display(), queries.len());
    Ok(Generated {
        path,
        pairs: queries.len(),
    })
}

/// Draws up to `count` random pairs with `source != target`, giving up after
/// `count * 100` draws.
fn random_pairs(graph: &Graph, count: usize, rng: &mut StdRng) -> Vec<Query> {
    let n = graph.num_nodes();
    let mut queries = Vec::with_capacity(count);
    if n < 2 {
        return queries;
    }

    let max_attempts = count.saturating_mul(100);
    let mut attempts = 0;
    while queries.len() < count && attempts < max_attempts {
        attempts += 1;
        let source = rng.gen_range(0..n);
        let target = rng.gen_range(0..n);
        if source != target {
            queries.push(Query::new(source, target));
        }
    }

    if queries.len() < count {
        log::warn!(
            "only generated {} of {} queries ({} attempts)",
            queries.len(),
            count,
            attempts
        );
    }
    queries
}

/// An empty query file.
pub fn empty(folder: &Path) -> Result<Generated> {
    write_queries(folder, "empty_queries.qry", &[])
}

/// A single self query on the first node, if the graph has one.
pub fn single_node(folder: &Path, graph: &Graph) -> Result<Generated> {
    let queries: Vec<Query> = graph.nodes().take(1).map(|n| Query::new(n, n)).collect();
    write_queries(folder, "single_node_queries.qry", &queries)
}

/// `count` random distinct-endpoint pairs drawn with [`COMPLETE_GRAPH_SEED`].
pub fn complete_graph(folder: &Path, graph: &Graph, count: usize) -> Result<Generated> {
    let mut rng = StdRng::seed_from_u64(COMPLETE_GRAPH_SEED);
    let queries = random_pairs(graph, count, &mut rng);
    write_queries(folder, &format!("complete_graph_queries_{count}.qry"), &queries)
}

pub fn normal(folder: &Path, graph: &Graph, count: usize, seed: u64) -> Result<Generated> {
    let mut rng = StdRng::seed_from_u64(seed);
    let queries = random_pairs(graph, count, &mut rng);
    write_queries(folder, &format!("normal_queries_{count}.qry"), &queries)
}

pub fn large_scale(folder: &Path, graph: &Graph, count: usize, seed: u64) -> Result<Generated> {
    let mut rng = StdRng::seed_from_u64(seed);
    let queries = random_pairs(graph, count, &mut rng);
    write_queries(folder, &format!("large_scale_queries_{count}.qry"), &queries)
}

/// Up to 10 distinct pairs from the predefined list, in random order.
pub fn small_test(folder: &Path, graph: &Graph, seed: u64) -> Result<Generated> {
    let n = graph.num_nodes();
    let mut candidates: Vec<Query> = PREDEFINED_PAIRS
        .iter()
        .filter(|&&(s, t)| (1..=n).contains(&s) && (1..=n).contains(&t))
        .map(|&(s, t)| Query::new(s - 1, t - 1))
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    candidates.shuffle(&mut rng);
    candidates.truncate(10);
    write_queries(folder, "small_test_queries_10.qry", &candidates)
}

/// Boundary queries: a self query, first/last node pairs, a node without
/// outgoing edges, and the highest out-degree node to its first neighbour.
pub fn edge_cases(folder: &Path, graph: &Graph) -> Result<Generated> {
    let n = graph.num_nodes();
    let mut queries = Vec::new();

    if n >= 1 {
        queries.push(Query::new(0, 0));
    }
    if n >= 2 {
        queries.push(Query::new(0, 1));
        queries.push(Query::new(n - 1, 0));
        queries.push(Query::new(0, n - 1));
    }

    if let Some(sink) = graph.nodes().find(|&node| graph.out_degree(node) == 0) {
        log::info!("Found node without outgoing edges: {}", sink + 1);
        queries.push(Query::new(sink, 0));
        queries.push(Query::new(0, sink));
    }

    // First node wins ties
    let busiest = graph
        .nodes()
        .fold(None, |best: Option<(usize, usize)>, node| {
            let degree = graph.out_degree(node);
            match best {
                Some((_, top)) if top >= degree => best,
                _ if degree > 0 => Some((node, degree)),
                _ => best,
            }
        });
    if let Some((node, degree)) = busiest {
        log::info!("Found high-degree node: {} (degree {})", node + 1, degree);
        queries.push(Query::new(node, graph.edges(node)[0].to));
    }

    write_queries(folder, "edge_case_queries.qry", &queries)
}

/// Runs every generator into `folder`, creating it if needed.
pub fn generate_all(folder: &Path, graph: &Graph, seed: u64) -> Result<Vec<Generated>> {
    fs::create_dir_all(folder)?;
    log::info!("Generating query files in {}", folder.display());

    Ok(vec![
        empty(folder)?,
        single_node(folder, graph)?,
        small_test(folder, graph, seed)?,
        complete_graph(folder, graph, 100)?,
        normal(folder, graph, 1000, seed)?,
        large_scale(folder, graph, 10_000, seed.wrapping_add(1))?,
        edge_cases(folder, graph)?,
    ])
}
