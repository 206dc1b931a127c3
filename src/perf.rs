//! Performance Metrics - Per-call timing samples and summary statistics
//!
//! Each sample is the mean wall-clock time of one call, measured over a batch
//! of calls so that very fast variants are not dominated by timer resolution.

use serde::{Deserialize, Serialize};

/// Collected timing samples (nanoseconds per call) for one algorithm/fixture pair.
#[derive(Debug, Clone, Default)]
pub struct PerfMetrics {
    pub samples_ns: Vec<f64>,
}

impl PerfMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        PerfMetrics {
            samples_ns: Vec::with_capacity(capacity),
        }
    }

    /// Record one batch: `elapsed_ns` spent over `iterations` calls.
    #[inline]
    pub fn add_batch(&mut self, elapsed_ns: u128, iterations: u64) {
        if iterations == 0 {
            return;
        }
        self.samples_ns.push(elapsed_ns as f64 / iterations as f64);
    }

    /// Calculate percentile from samples
    ///
    /// # Arguments
    /// * `p` - Percentile (0-100), e.g., 50.0 for median, 99.0 for P99
    pub fn percentile(&self, p: f64) -> Option<f64> {
        if self.samples_ns.is_empty() {
            return None;
        }
        let mut sorted = self.samples_ns.clone();
        sorted.sort_unstable_by(f64::total_cmp);
        let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        Some(sorted[idx.min(sorted.len() - 1)])
    }

    pub fn min(&self) -> Option<f64> {
        self.samples_ns.iter().copied().min_by(f64::total_cmp)
    }

    pub fn max(&self) -> Option<f64> {
        self.samples_ns.iter().copied().max_by(f64::total_cmp)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.samples_ns.is_empty() {
            return None;
        }
        Some(self.samples_ns.iter().sum::<f64>() / self.samples_ns.len() as f64)
    }

    /// Sample standard deviation (n - 1); zero for fewer than two samples.
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let n = self.samples_ns.len();
        if n < 2 {
            return Some(0.0);
        }
        let var = self
            .samples_ns
            .iter()
            .map(|s| (s - mean).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        Some(var.sqrt())
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            samples: self.samples_ns.len(),
            min_ns: self.min().unwrap_or(0.0),
            mean_ns: self.mean().unwrap_or(0.0),
            p50_ns: self.percentile(50.0).unwrap_or(0.0),
            p99_ns: self.percentile(99.0).unwrap_or(0.0),
            max_ns: self.max().unwrap_or(0.0),
            std_dev_ns: self.std_dev().unwrap_or(0.0),
        }
    }
}

/// Reduced view of [`PerfMetrics`] carried in reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub samples: usize,
    pub min_ns: f64,
    pub mean_ns: f64,
    pub p50_ns: f64,
    pub p99_ns: f64,
    pub max_ns: f64,
    pub std_dev_ns: f64,
}

/// Human-readable duration for table output: `812.4 ns`, `3.21 us`, `14.07 ms`.
pub fn format_ns(ns: f64) -> String {
    if ns < 1_000.0 {
        format!("{:.1} ns", ns)
    } else if ns < 1_000_000.0 {
        format!("{:.2} us", ns / 1_000.0)
    } else if ns < 1_000_000_000.0 {
        format!("{:.2} ms", ns / 1_000_000.0)
    } else {
        format!("{:.2} s", ns / 1_000_000_000.0)
    }
}
