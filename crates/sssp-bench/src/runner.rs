//! Timed query execution
//!
//! Each query is timed as a whole: heap construction, the Dijkstra run and
//! the distance lookup. Results are written one per line as
//! `source target distance elapsed_seconds` with 1-based ids; unreachable
//! pairs print `inf`.

use crate::error::Result;
use crate::queries::{load_queries, Query};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sssp_heaps::{run_sssp, shortest_distance, Graph, HeapKind, NodeId};
use std::fs::{self, File};
use std::hint::black_box;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Lookups echoed by [`run_random`] in verbose mode
const VERBOSE_LOOKUPS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryOutcome {
    pub query: Query,
    pub distance: f64,
    pub elapsed: Duration,
}

impl QueryOutcome {
    pub fn is_reachable(&self) -> bool {
        self.distance.is_finite()
    }
}

/// Totals over one query file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunSummary {
    pub queries: usize,
    pub reachable: usize,
    pub skipped: usize,
    pub total: Duration,
}

impl RunSummary {
    pub fn average(&self) -> Duration {
        match u32::try_from(self.queries) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(n) => self.total / n,
        }
    }
}

/// Runs one query with a fresh heap and times it.
pub fn run_single_query(graph: &Graph, query: Query, kind: HeapKind) -> Result<QueryOutcome> {
    let start = Instant::now();
    let distance = shortest_distance(graph, query.source, query.target, kind)?;
    Ok(QueryOutcome {
        query,
        distance,
        elapsed: start.elapsed(),
    })
}

/// Formats a result line.
pub fn format_outcome(outcome: &QueryOutcome) -> String {
    format!(
        "{} {:.6} {:.6}",
        outcome.query,
        outcome.distance,
        outcome.elapsed.as_secs_f64()
    )
}

/// Runs every query of `query_file` and writes the results to `output`.
///
/// Queries with ids outside the graph are skipped with a warning.
pub fn run_query_file(
    graph: &Graph,
    query_file: &Path,
    output: &Path,
    kind: HeapKind,
) -> Result<RunSummary> {
    let queries = load_queries(query_file)?;
    let mut summary = RunSummary::default();
    if queries.is_empty() {
        log::warn!("No queries loaded from {}", query_file.display());
        return Ok(summary);
    }

    let mut out = BufWriter::new(File::create(output)?);
    for query in queries {
        if !query.fits(graph) {
            log::warn!(
                "skipping query {} (graph has {} nodes)",
                query,
                graph.num_nodes()
            );
            summary.skipped += 1;
            continue;
        }

        let outcome = run_single_query(graph, query, kind)?;
        summary.queries += 1;
        summary.total += outcome.elapsed;
        if outcome.is_reachable() {
            summary.reachable += 1;
        }
        writeln!(out, "{}", format_outcome(&outcome))?;
    }
    out.flush()?;

    log::info!("=== Query File Summary: {} ===", query_file.display());
    log::info!("Heap: {}", kind);
    log::info!(
        "Queries: {}, Reachable: {}, Skipped: {}",
        summary.queries,
        summary.reachable,
        summary.skipped
    );
    log::info!(
        "Total time: {:.6} sec (includes heap build + Dijkstra)",
        summary.total.as_secs_f64()
    );
    log::info!(
        "Average time per query: {:.6} sec",
        summary.average().as_secs_f64()
    );

    Ok(summary)
}

/// Path of the result file for `query_file` inside `out_dir`.
pub fn result_path(query_file: &Path, out_dir: &Path) -> PathBuf {
    let name = query_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "queries".to_string());
    out_dir.join(format!("{name}_result.txt"))
}

/// Runs a single query file, or every `*.qry` file of a directory, writing
/// results into `out_dir`.
pub fn run_queries(
    graph: &Graph,
    queries: &Path,
    out_dir: &Path,
    kind: HeapKind,
) -> Result<Vec<(PathBuf, RunSummary)>> {
    fs::create_dir_all(out_dir)?;

    let files = if queries.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(queries)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "qry"))
            .collect();
        files.sort();
        files
    } else {
        vec![queries.to_path_buf()]
    };

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        let output = result_path(&file, out_dir);
        let summary = run_query_file(graph, &file, &output, kind)?;
        results.push((output, summary));
    }
    Ok(results)
}

/// Report of [`run_random`].
#[derive(Debug, Clone, PartialEq)]
pub struct RandomReport {
    pub source: NodeId,
    pub lookups: usize,
    pub sssp_time: Duration,
    pub lookup_time: Duration,
    pub reachable: usize,
}

/// One full SSSP from a seeded random source, then `lookups` random distance
/// lookups, timed separately.
pub fn run_random(
    graph: &Graph,
    lookups: usize,
    seed: u64,
    verbose: bool,
    kind: HeapKind,
) -> Result<RandomReport> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = graph.num_nodes();
    let source = if n == 0 { 0 } else { rng.gen_range(0..n) };
    log::info!("Random benchmark mode: source {}, {} lookups", source + 1, lookups);

    let start = Instant::now();
    let dist = run_sssp(graph, source, kind)?;
    let sssp_time = start.elapsed();
    log::info!("{} heap build + Dijkstra: {:.6} sec", kind, sssp_time.as_secs_f64());

    let mut reachable = 0;
    let start = Instant::now();
    for i in 0..lookups {
        let target = rng.gen_range(0..n);
        let d = black_box(dist[target]);
        if d.is_finite() {
            reachable += 1;
        }
        if verbose && i < VERBOSE_LOOKUPS {
            log::info!("Query {}: t={} value={:.0}", i + 1, target + 1, d);
        }
    }
    let lookup_time = start.elapsed();

    log::info!(
        "Distance lookup only time: {:.6} sec for {} lookups",
        lookup_time.as_secs_f64(),
        lookups
    );
    if lookups > 0 {
        log::info!(
            "Per lookup time: {:.9} sec",
            lookup_time.as_secs_f64() / lookups as f64
        );
    }
    log::info!(
        "Total time (build + lookups): {:.6} sec",
        (sssp_time + lookup_time).as_secs_f64()
    );

    Ok(RandomReport {
        source,
        lookups,
        sssp_time,
        lookup_time,
        reachable,
    })
}
