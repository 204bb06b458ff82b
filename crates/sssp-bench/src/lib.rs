//! Benchmark harness for `sssp-heaps`
//!
//! Loads DIMACS road graphs, generates and validates query files, and runs
//! timed single-pair queries over either heap backend.

pub mod dimacs;
pub mod error;
pub mod generate;
pub mod queries;
pub mod runner;

pub use dimacs::{load_dimacs, read_dimacs};
pub use error::{BenchError, Result};
pub use queries::{load_queries, validate_query_file, Query, Validation};
pub use runner::{run_queries, run_random, run_single_query, QueryOutcome, RandomReport, RunSummary};
