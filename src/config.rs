use crate::algorithms::Algorithm;
use crate::error::{HarnessError, Result};
use crate::fixtures::LARGE_FIXTURE_COUNT;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    /// File logging is off unless a directory is given.
    pub log_dir: Option<String>,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub bench: BenchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
            log_file: "contains_sum.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
            bench: BenchConfig::default(),
        }
    }
}

/// Benchmark runner settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    /// Discarded samples run before measuring.
    pub warmup_samples: u32,
    pub sample_count: u32,
    /// Calibration doubles the batch size until one batch takes this long.
    pub target_sample_time_ms: u64,
    pub max_iterations_per_sample: u64,
    pub large_fixture_count: usize,
    /// Fixed RNG seed for a reproducible large fixture.
    pub seed: Option<u64>,
    /// Fixture indices to benchmark; empty means all.
    pub fixtures: Vec<usize>,
    /// Algorithm names to benchmark; empty means all.
    pub algorithms: Vec<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            warmup_samples: 3,
            sample_count: 20,
            target_sample_time_ms: 10,
            max_iterations_per_sample: 1 << 20,
            large_fixture_count: LARGE_FIXTURE_COUNT,
            seed: None,
            fixtures: Vec::new(),
            algorithms: Vec::new(),
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(HarnessError::InvalidBenchConfig(
                "sample_count must be positive".to_string(),
            ));
        }
        if self.max_iterations_per_sample == 0 {
            return Err(HarnessError::InvalidBenchConfig(
                "max_iterations_per_sample must be positive".to_string(),
            ));
        }
        if self.large_fixture_count == 0 {
            return Err(HarnessError::InvalidBenchConfig(
                "large_fixture_count must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Configured algorithm names resolved in declared order; all when empty.
    pub fn selected_algorithms(&self) -> Result<Vec<Algorithm>> {
        if self.algorithms.is_empty() {
            return Ok(Algorithm::ALL.to_vec());
        }
        self.algorithms.iter().map(|name| name.parse()).collect()
    }
}

impl AppConfig {
    /// Read a YAML config. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", path.display()))?;
        config.bench.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "log_level: debug\nbench:\n  sample_count: 5\n  seed: 42\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, "contains_sum.log");
        assert_eq!(config.bench.sample_count, 5);
        assert_eq!(config.bench.seed, Some(42));
        assert_eq!(config.bench.warmup_samples, 3);
        assert_eq!(config.bench.large_fixture_count, LARGE_FIXTURE_COUNT);
    }

    #[test]
    fn test_validate_rejects_zero_samples() {
        let bench = BenchConfig {
            sample_count: 0,
            ..Default::default()
        };
        assert!(matches!(
            bench.validate(),
            Err(HarnessError::InvalidBenchConfig(_))
        ));
    }

    #[test]
    fn test_selected_algorithms() {
        let mut bench = BenchConfig::default();
        assert_eq!(bench.selected_algorithms().unwrap(), Algorithm::ALL.to_vec());

        bench.algorithms = vec!["LinearHashSet".into(), "DoubleLoop".into()];
        assert_eq!(
            bench.selected_algorithms().unwrap(),
            vec![Algorithm::LinearHashSet, Algorithm::DoubleLoop]
        );

        bench.algorithms = vec!["Bogus".into()];
        assert_eq!(
            bench.selected_algorithms(),
            Err(HarnessError::UnknownAlgorithm("Bogus".to_string()))
        );
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = AppConfig::load(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.bench, BenchConfig::default());
        assert!(config.log_dir.is_none());
    }
}
