//! Benchmark report - structured results and the summary table

use crate::algorithms::Algorithm;
use crate::alloc_counter::AllocStats;
use crate::perf::{StatsSummary, format_ns};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Measurements for one algorithm on one fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchRow {
    pub fixture_index: usize,
    pub fixture_len: usize,
    pub algorithm: Algorithm,
    /// What the algorithm returned during measurement.
    pub returned: bool,
    pub correct: bool,
    pub iterations_per_sample: u64,
    pub stats: StatsSummary,
    /// Allocations made by a single call.
    pub alloc: AllocStats,
    /// Mean time relative to the baseline on the same fixture.
    pub ratio: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub generated_at: DateTime<Utc>,
    pub git_hash: String,
    pub baseline: Algorithm,
    pub rows: Vec<BenchRow>,
}

impl BenchReport {
    /// Build the report and fill in every row's ratio against `baseline`.
    ///
    /// Rows whose fixture has no baseline measurement keep `ratio: None`.
    pub fn new(mut rows: Vec<BenchRow>, baseline: Algorithm, git_hash: impl Into<String>) -> Self {
        let baseline_means: Vec<(usize, f64)> = rows
            .iter()
            .filter(|r| r.algorithm == baseline)
            .map(|r| (r.fixture_index, r.stats.mean_ns))
            .collect();

        for row in &mut rows {
            row.ratio = if row.algorithm == baseline {
                Some(1.0)
            } else {
                baseline_means
                    .iter()
                    .find(|(idx, _)| *idx == row.fixture_index)
                    .filter(|(_, mean)| *mean > 0.0)
                    .map(|(_, mean)| row.stats.mean_ns / mean)
            };
        }

        Self {
            generated_at: Utc::now(),
            git_hash: git_hash.into(),
            baseline,
            rows,
        }
    }

    pub fn all_correct(&self) -> bool {
        self.rows.iter().all(|r| r.correct)
    }

    pub fn row(&self, fixture_index: usize, algorithm: Algorithm) -> Option<&BenchRow> {
        self.rows
            .iter()
            .find(|r| r.fixture_index == fixture_index && r.algorithm == algorithm)
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Benchmark Summary (baseline: {}, build {}) ===",
            self.baseline, self.git_hash
        )?;
        writeln!(
            f,
            "{:>7} {:>6}  {:<32} {:>12} {:>12} {:>12} {:>8} {:>7} {:>9}  {}",
            "Fixture", "Len", "Method", "Mean", "P50", "StdDev", "Ratio", "Allocs", "Bytes", "Result"
        )?;

        let mut last_fixture = None;
        for row in &self.rows {
            if last_fixture.is_some() && last_fixture != Some(row.fixture_index) {
                writeln!(f)?;
            }
            last_fixture = Some(row.fixture_index);

            let ratio = row
                .ratio
                .map(|r| format!("{:.2}", r))
                .unwrap_or_else(|| "?".to_string());
            let marker = if row.algorithm == self.baseline { "*" } else { " " };
            let result = if row.correct { "ok" } else { "WRONG" };

            writeln!(
                f,
                "{:>7} {:>6} {}{:<32} {:>12} {:>12} {:>12} {:>8} {:>7} {:>9}  {}",
                row.fixture_index,
                row.fixture_len,
                marker,
                row.algorithm.name(),
                format_ns(row.stats.mean_ns),
                format_ns(row.stats.p50_ns),
                format_ns(row.stats.std_dev_ns),
                ratio,
                row.alloc.allocations,
                row.alloc.bytes,
                result,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fixture_index: usize, algorithm: Algorithm, mean_ns: f64) -> BenchRow {
        BenchRow {
            fixture_index,
            fixture_len: 5,
            algorithm,
            returned: true,
            correct: true,
            iterations_per_sample: 1,
            stats: StatsSummary {
                samples: 1,
                mean_ns,
                ..Default::default()
            },
            alloc: AllocStats::default(),
            ratio: None,
        }
    }

    #[test]
    fn test_ratios_relative_to_baseline() {
        let report = BenchReport::new(
            vec![
                row(0, Algorithm::DoubleLoop, 200.0),
                row(0, Algorithm::LinearHashSet, 50.0),
                row(1, Algorithm::DoubleLoop, 100.0),
                row(1, Algorithm::BinarySearch, 300.0),
            ],
            Algorithm::DoubleLoop,
            "test",
        );

        assert_eq!(report.row(0, Algorithm::DoubleLoop).unwrap().ratio, Some(1.0));
        assert_eq!(report.row(0, Algorithm::LinearHashSet).unwrap().ratio, Some(0.25));
        assert_eq!(report.row(1, Algorithm::BinarySearch).unwrap().ratio, Some(3.0));
    }

    #[test]
    fn test_ratio_missing_without_baseline_row() {
        let report = BenchReport::new(
            vec![row(2, Algorithm::LinearDictionary, 10.0)],
            Algorithm::DoubleLoop,
            "test",
        );
        assert_eq!(report.rows[0].ratio, None);
    }

    #[test]
    fn test_table_marks_baseline_and_wrong_rows() {
        let mut wrong = row(0, Algorithm::BinarySearch, 10.0);
        wrong.correct = false;
        let report = BenchReport::new(
            vec![row(0, Algorithm::DoubleLoop, 20.0), wrong],
            Algorithm::DoubleLoop,
            "abc123",
        );

        let table = report.to_string();
        assert!(table.contains("baseline: ContainsSumDoubleLoop, build abc123"));
        assert!(table.contains("*ContainsSumDoubleLoop"));
        assert!(table.contains("WRONG"));
        assert!(!report.all_correct());
    }
}
