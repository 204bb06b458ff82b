use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sssp_bench::{generate, load_dimacs, run_queries, run_random, validate_query_file};
use sssp_heaps::{Graph, HeapKind};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(name = "sssp-bench")]
#[command(about = "Run Dijkstra over Fibonacci or pairing heaps on DIMACS graphs", long_about = None)]
struct Cli {
    /// Path to the DIMACS .gr graph file
    #[arg(short, long, global = true)]
    graph: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a query file, or every *.qry file of a directory
    Query {
        /// Query file or directory of query files
        queries: PathBuf,

        #[arg(long, default_value_t = HeapKind::Fibonacci)]
        heap: HeapKind,

        /// Directory receiving the <name>_result.txt files
        #[arg(short, long, default_value = "result")]
        out_dir: PathBuf,
    },

    /// One SSSP from a random source, then timed random distance lookups
    Random {
        /// Number of lookups
        count: usize,

        #[arg(long, default_value_t = HeapKind::Fibonacci)]
        heap: HeapKind,

        /// Seed for the source and the lookups (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,

        /// Echo the first lookups
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the standard set of query files
    Generate {
        /// Folder receiving the query files
        #[arg(default_value = "queries")]
        folder: PathBuf,

        /// Seed for the random query sets (defaults to the clock)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Count the pairs of query files that fit the graph
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn load_graph(path: Option<&Path>) -> Result<Graph> {
    let path = path.context("a graph file is required (--graph <PATH>)")?;
    let graph =
        load_dimacs(path).with_context(|| format!("Failed to load graph {}", path.display()))?;
    log::info!("Graph loaded: {} nodes, {} arcs", graph.num_nodes(), graph.num_edges());
    Ok(graph)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let graph = load_graph(cli.graph.as_deref())?;

    match cli.command {
        Command::Query {
            queries,
            heap,
            out_dir,
        } => {
            let results = run_queries(&graph, &queries, &out_dir, heap)
                .with_context(|| format!("Failed to run queries from {}", queries.display()))?;
            for (path, summary) in results {
                log::info!(
                    "{}: {} queries, {} reachable",
                    path.display(),
                    summary.queries,
                    summary.reachable
                );
            }
        }
        Command::Random {
            count,
            heap,
            seed,
            verbose,
        } => {
            let seed = seed.unwrap_or_else(clock_seed);
            run_random(&graph, count, seed, verbose, heap).context("Random benchmark failed")?;
        }
        Command::Generate { folder, seed } => {
            let seed = seed.unwrap_or_else(clock_seed);
            let files = generate::generate_all(&folder, &graph, seed)
                .with_context(|| format!("Failed to generate queries in {}", folder.display()))?;
            log::info!("All {} query files generated", files.len());

            for file in files.iter().filter(|f| f.pairs > 0) {
                validate_query_file(&file.path, &graph)
                    .with_context(|| format!("Failed to validate {}", file.path.display()))?;
            }
        }
        Command::Validate { files } => {
            for file in files {
                validate_query_file(&file, &graph)
                    .with_context(|| format!("Failed to validate {}", file.display()))?;
            }
        }
    }

    Ok(())
}
