//! Driver - correctness checks and the benchmark runner
//!
//! Both modes walk an explicit list: test mode crosses every algorithm with
//! every fixture, benchmark mode crosses the fixture indices and algorithms
//! declared in a [`BenchPlan`].

use crate::algorithms::{Algorithm, ContainsSumFn};
use crate::alloc_counter;
use crate::config::BenchConfig;
use crate::error::Result;
use crate::fixtures::{Fixture, FixtureSet};
use crate::perf::PerfMetrics;
use crate::report::{BenchReport, BenchRow};
use std::hint::black_box;
use std::io::{self, Write};
use std::time::Instant;

// ============================================================
// TEST MODE
// ============================================================

/// Result of one algorithm on one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestOutcome {
    pub algorithm: Algorithm,
    pub fixture_index: usize,
    pub expected: bool,
    pub actual: bool,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

#[derive(Debug, Clone, Default)]
pub struct TestReport {
    pub outcomes: Vec<TestOutcome>,
}

impl TestReport {
    pub fn failures(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(TestOutcome::passed)
    }
}

/// Check one algorithm against every fixture, writing a line per fixture.
///
/// A failure dumps the fixture as JSON and moves on; it never stops the run.
pub fn test_implementation<W: Write>(
    algorithm: Algorithm,
    fixtures: &FixtureSet,
    out: &mut W,
) -> io::Result<Vec<TestOutcome>> {
    let mut outcomes = Vec::with_capacity(fixtures.len());

    for (fixture_index, fixture) in fixtures.iter().enumerate() {
        let actual = algorithm.contains_sum(fixture.numbers(), fixture.target());
        let outcome = TestOutcome {
            algorithm,
            fixture_index,
            expected: fixture.expected(),
            actual,
        };

        if outcome.passed() {
            writeln!(out, "Implementation '{}' passed.", algorithm)?;
            tracing::debug!(%algorithm, fixture_index, "passed");
        } else {
            let json = serde_json::to_string_pretty(fixture).map_err(io::Error::other)?;
            writeln!(
                out,
                "Implementation '{}' failed for test data: {}",
                algorithm, json
            )?;
            tracing::warn!(%algorithm, fixture_index, expected = outcome.expected, actual, "failed");
        }
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

pub fn run_tests<W: Write>(
    fixtures: &FixtureSet,
    algorithms: &[Algorithm],
    out: &mut W,
) -> io::Result<TestReport> {
    let mut report = TestReport::default();
    for &algorithm in algorithms {
        report
            .outcomes
            .extend(test_implementation(algorithm, fixtures, out)?);
    }

    let failed = report.failures().count();
    tracing::info!(
        checks = report.outcomes.len(),
        failed,
        "Correctness checks finished"
    );
    Ok(report)
}

// ============================================================
// BENCHMARK MODE
// ============================================================

/// Fixture indices and algorithms to measure, in run order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchPlan {
    pub fixture_indices: Vec<usize>,
    pub algorithms: Vec<Algorithm>,
}

impl BenchPlan {
    /// Resolve the plan from config. `fixture_override` (the `--fixture`
    /// argument) replaces the configured index list.
    ///
    /// # Errors
    /// * `FixtureIndexOutOfRange` - an index not present in `fixtures`
    /// * `UnknownAlgorithm` - a configured algorithm name does not parse
    pub fn from_config(
        config: &BenchConfig,
        fixtures: &FixtureSet,
        fixture_override: Option<usize>,
    ) -> Result<Self> {
        let fixture_indices = match fixture_override {
            Some(index) => vec![index],
            None if config.fixtures.is_empty() => (0..fixtures.len()).collect(),
            None => config.fixtures.clone(),
        };
        for &index in &fixture_indices {
            fixtures.get(index)?;
        }

        Ok(Self {
            fixture_indices,
            algorithms: config.selected_algorithms()?,
        })
    }
}

/// Run `iterations` calls back to back; returns elapsed nanoseconds and the
/// last answer.
#[inline(never)]
fn time_batch(f: ContainsSumFn, fixture: &Fixture, iterations: u64) -> (u128, bool) {
    let numbers = fixture.numbers();
    let target = fixture.target();
    let mut result = false;

    let start = Instant::now();
    for _ in 0..iterations {
        result = black_box(f(black_box(numbers), black_box(target)));
    }
    (start.elapsed().as_nanos(), result)
}

/// Double the batch size until one batch reaches the target sample time.
fn calibrate(f: ContainsSumFn, fixture: &Fixture, config: &BenchConfig) -> u64 {
    let target_ns = config.target_sample_time_ms as u128 * 1_000_000;
    let max = config.max_iterations_per_sample.max(1);
    let mut iterations = 1u64;

    loop {
        let (elapsed, _) = time_batch(f, fixture, iterations);
        if elapsed >= target_ns || iterations >= max {
            return iterations;
        }
        iterations = iterations.saturating_mul(2).min(max);
    }
}

fn bench_one(
    algorithm: Algorithm,
    fixture_index: usize,
    fixture: &Fixture,
    config: &BenchConfig,
) -> BenchRow {
    let f = algorithm.func();
    let iterations = calibrate(f, fixture, config);

    for _ in 0..config.warmup_samples {
        time_batch(f, fixture, iterations);
    }

    let mut perf = PerfMetrics::with_capacity(config.sample_count as usize);
    let mut returned = false;
    for _ in 0..config.sample_count {
        let (elapsed, result) = time_batch(f, fixture, iterations);
        perf.add_batch(elapsed, iterations);
        returned = result;
    }

    let (_, alloc) =
        alloc_counter::measure(|| black_box(f(black_box(fixture.numbers()), fixture.target())));

    let stats = perf.summary();
    tracing::debug!(
        %algorithm,
        fixture_index,
        iterations,
        mean_ns = stats.mean_ns,
        allocations = alloc.allocations,
        "measured"
    );

    BenchRow {
        fixture_index,
        fixture_len: fixture.len(),
        algorithm,
        returned,
        correct: returned == fixture.expected(),
        iterations_per_sample: iterations,
        stats,
        alloc,
        ratio: None,
    }
}

/// Measure every (fixture, algorithm) pair in `plan`.
pub fn run_benchmarks(
    fixtures: &FixtureSet,
    plan: &BenchPlan,
    config: &BenchConfig,
) -> Result<BenchReport> {
    config.validate()?;

    let mut rows = Vec::with_capacity(plan.fixture_indices.len() * plan.algorithms.len());
    for &fixture_index in &plan.fixture_indices {
        let fixture = fixtures.get(fixture_index)?;
        tracing::info!(fixture_index, len = fixture.len(), "Benchmarking fixture");

        for &algorithm in &plan.algorithms {
            rows.push(bench_one(algorithm, fixture_index, fixture, config));
        }
    }

    Ok(BenchReport::new(rows, Algorithm::BASELINE, crate::GIT_HASH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn small_set() -> FixtureSet {
        FixtureSet::standard(50, &mut StdRng::seed_from_u64(3)).unwrap()
    }

    fn fast_config() -> BenchConfig {
        BenchConfig {
            warmup_samples: 1,
            sample_count: 3,
            target_sample_time_ms: 0,
            max_iterations_per_sample: 4,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_checks_pass_and_print() {
        let fixtures = small_set();
        let mut out = Vec::new();
        let report = run_tests(&fixtures, &Algorithm::ALL, &mut out).unwrap();

        assert_eq!(report.outcomes.len(), 30);
        assert!(report.all_passed());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 30);
        assert!(text.contains("Implementation 'ContainsSumLinearDictionary' passed."));
    }

    #[test]
    fn test_failure_dumps_fixture_and_continues() {
        // Deliberately wrong expectation on the first fixture.
        let fixtures = FixtureSet::new(vec![
            Fixture::new([1, 2], 3, false),
            Fixture::new([1, 2], 4, false),
        ]);
        let mut out = Vec::new();
        let outcomes = test_implementation(Algorithm::LinearHashSet, &fixtures, &mut out).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].passed());
        assert!(outcomes[1].passed());

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Implementation 'ContainsSumLinearHashSet' failed for test data: {"));
        assert!(text.contains("\"target\": 3"));
        assert!(text.ends_with("Implementation 'ContainsSumLinearHashSet' passed.\n"));
    }

    #[test]
    fn test_plan_defaults_to_everything() {
        let fixtures = small_set();
        let plan = BenchPlan::from_config(&BenchConfig::default(), &fixtures, None).unwrap();
        assert_eq!(plan.fixture_indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(plan.algorithms, Algorithm::ALL.to_vec());
    }

    #[test]
    fn test_plan_override_and_bad_index() {
        let fixtures = small_set();
        let plan = BenchPlan::from_config(&BenchConfig::default(), &fixtures, Some(3)).unwrap();
        assert_eq!(plan.fixture_indices, vec![3]);

        assert_eq!(
            BenchPlan::from_config(&BenchConfig::default(), &fixtures, Some(9)),
            Err(HarnessError::FixtureIndexOutOfRange { index: 9, len: 6 })
        );
    }

    #[test]
    fn test_calibrate_respects_max() {
        let fixture = Fixture::new([1, 2, 3], 100, false);
        let config = BenchConfig {
            target_sample_time_ms: 60_000,
            max_iterations_per_sample: 16,
            ..Default::default()
        };
        assert_eq!(calibrate(Algorithm::DoubleLoop.func(), &fixture, &config), 16);
    }

    #[test]
    fn test_benchmark_report_rows() {
        let fixtures = small_set();
        let plan = BenchPlan {
            fixture_indices: vec![0, 5],
            algorithms: Algorithm::ALL.to_vec(),
        };
        let report = run_benchmarks(&fixtures, &plan, &fast_config()).unwrap();

        assert_eq!(report.rows.len(), 10);
        assert!(report.all_correct());
        assert_eq!(report.baseline, Algorithm::DoubleLoop);
        for row in &report.rows {
            assert_eq!(row.stats.samples, 3);
            assert!(row.iterations_per_sample >= 1 && row.iterations_per_sample <= 4);
            assert!(row.ratio.is_some() || row.stats.mean_ns == 0.0);
        }
        assert_eq!(report.row(5, Algorithm::DoubleLoop).unwrap().ratio, Some(1.0));
        assert_eq!(report.row(5, Algorithm::BinarySearch).unwrap().fixture_len, 50);
    }

    #[test]
    fn test_allocations_recorded_per_variant() {
        let fixtures = small_set();
        let plan = BenchPlan {
            fixture_indices: vec![5],
            algorithms: vec![Algorithm::DoubleLoopOptimized, Algorithm::LinearHashSet],
        };
        let report = run_benchmarks(&fixtures, &plan, &fast_config()).unwrap();

        // The counting allocator is installed for this test binary.
        let loops = report.row(5, Algorithm::DoubleLoopOptimized).unwrap();
        let hashed = report.row(5, Algorithm::LinearHashSet).unwrap();
        assert_eq!(loops.alloc.allocations, 0);
        assert!(hashed.alloc.allocations >= 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let fixtures = small_set();
        let plan = BenchPlan::from_config(&BenchConfig::default(), &fixtures, None).unwrap();
        let config = BenchConfig {
            sample_count: 0,
            ..fast_config()
        };
        assert!(matches!(
            run_benchmarks(&fixtures, &plan, &config),
            Err(HarnessError::InvalidBenchConfig(_))
        ));
    }
}
