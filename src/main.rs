//! contains_sum - benchmark and correctness driver
//!
//! ```text
//! contains_sum test                      # check all algorithms on all fixtures
//! contains_sum [--fixture N]             # benchmark (all fixtures by default)
//!              [--config bench.yaml]     # optional YAML config
//!              [--output report.json]    # also write the report as JSON
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;

use contains_sum::alloc_counter::CountingAllocator;
use contains_sum::{Algorithm, AppConfig, BenchPlan, FixtureSet, run_benchmarks, run_tests};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

// ============================================================
// ARGUMENTS
// ============================================================

fn use_test_mode() -> bool {
    std::env::args().skip(1).any(|a| a == "test")
}

fn get_arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1).cloned())
}

fn get_config_path() -> Option<PathBuf> {
    get_arg_value("--config").map(PathBuf::from)
}

fn get_output_path() -> Option<PathBuf> {
    get_arg_value("--output").map(PathBuf::from)
}

fn get_fixture_index() -> anyhow::Result<Option<usize>> {
    get_arg_value("--fixture")
        .map(|v| {
            v.parse::<usize>()
                .with_context(|| format!("Invalid --fixture value: {}", v))
        })
        .transpose()
}

// ============================================================
// MAIN
// ============================================================

fn run() -> anyhow::Result<ExitCode> {
    let app_config = AppConfig::load_or_default(get_config_path().as_deref())?;
    let _log_guard = contains_sum::logging::init_logging(&app_config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git = contains_sum::GIT_HASH,
        "Starting contains_sum"
    );

    let bench = &app_config.bench;
    let mut rng = match bench.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let fixtures = FixtureSet::standard(bench.large_fixture_count, &mut rng)
        .context("Failed to build fixtures")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if use_test_mode() {
        let report = run_tests(&fixtures, &Algorithm::ALL, &mut out)?;
        return Ok(if report.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let plan = BenchPlan::from_config(bench, &fixtures, get_fixture_index()?)?;
    tracing::info!(
        fixtures = ?plan.fixture_indices,
        algorithms = plan.algorithms.len(),
        "Running benchmarks"
    );

    let report = run_benchmarks(&fixtures, &plan, bench)?;
    writeln!(out, "{}", report)?;

    if let Some(path) = get_output_path() {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        tracing::info!(path = %path.display(), "Report written");
    }

    if !report.all_correct() {
        tracing::warn!("Some algorithms returned a wrong answer during benchmarking");
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
