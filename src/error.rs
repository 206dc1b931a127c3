//! Harness error types

use thiserror::Error;

/// Errors raised while building fixtures or a benchmark plan.
///
/// A wrong answer from an algorithm is NOT an error: it is a test failure
/// recorded in the report. These variants cover malformed setup only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    #[error("Fixture count must be positive, got {0}")]
    InvalidFixtureCount(usize),

    #[error("Fixture count {count} too large: target 4*count+1 overflows i32")]
    FixtureTargetOverflow { count: usize },

    #[error("Fixture index {index} out of range (0..{len})")]
    FixtureIndexOutOfRange { index: usize, len: usize },

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Invalid bench config: {0}")]
    InvalidBenchConfig(String),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
