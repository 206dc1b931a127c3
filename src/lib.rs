//! contains_sum - Two-Sum Search Microbenchmarks
//!
//! Compares five ways of answering "does any pair in this list add up to
//! the target?" over a fixed set of fixtures.
//!
//! # Modules
//!
//! - [`algorithms`] - The five search variants and the [`Algorithm`] enum
//! - [`fixtures`] - Static test cases and the generated large case
//! - [`harness`] - Correctness driver and benchmark runner
//! - [`report`] - Structured benchmark results and summary table
//! - [`perf`] - Timing samples and statistics
//! - [`alloc_counter`] - Per-thread allocation accounting
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod algorithms;
pub mod alloc_counter;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod logging;
pub mod perf;
pub mod report;

/// Git revision this build came from (`unknown` outside a checkout).
pub const GIT_HASH: &str = env!("GIT_HASH");

// Convenient re-exports at crate root
pub use algorithms::{Algorithm, ContainsSumFn};
pub use config::{AppConfig, BenchConfig};
pub use error::HarnessError;
pub use fixtures::{Fixture, FixtureSet, LARGE_FIXTURE_COUNT, make_large_fixture};
pub use harness::{BenchPlan, TestOutcome, TestReport, run_benchmarks, run_tests};
pub use report::{BenchReport, BenchRow};
