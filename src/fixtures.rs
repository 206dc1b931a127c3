//! Fixture Provider - the fixed test cases every algorithm runs against
//!
//! The fixture list is built once at startup and passed by reference to the
//! test driver and the benchmark runner. Index order matters: the benchmark
//! `--fixture N` parameter addresses fixtures by position.

use crate::error::{HarnessError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Element count of the generated large fixture in the standard set.
pub const LARGE_FIXTURE_COUNT: usize = 5000;

/// One test case: numbers, a target sum and the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    numbers: Vec<i32>,
    target: i32,
    expected: bool,
}

impl Fixture {
    pub fn new(numbers: impl Into<Vec<i32>>, target: i32, expected: bool) -> Self {
        Self {
            numbers: numbers.into(),
            target,
            expected,
        }
    }

    pub fn numbers(&self) -> &[i32] {
        &self.numbers
    }

    pub fn target(&self) -> i32 {
        self.target
    }

    pub fn expected(&self) -> bool {
        self.expected
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Generate `count` values drawn uniformly from `[0, 2*count)` with target
/// `4*count + 1`.
///
/// The largest possible pair sum is `2*(2*count - 1) = 4*count - 2`, which is
/// always below the target, so the expected answer is `false` by
/// construction rather than by chance.
///
/// # Errors
/// * `InvalidFixtureCount` - `count` is zero
/// * `FixtureTargetOverflow` - `4*count + 1` does not fit in `i32`
pub fn make_large_fixture<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Fixture> {
    if count == 0 {
        return Err(HarnessError::InvalidFixtureCount(count));
    }
    let target = count
        .checked_mul(4)
        .and_then(|t| t.checked_add(1))
        .and_then(|t| i32::try_from(t).ok())
        .ok_or(HarnessError::FixtureTargetOverflow { count })?;

    // 2*count < 4*count+1 <= i32::MAX, so the bound fits.
    let max_value = (count * 2) as i32;
    let numbers: Vec<i32> = (0..count).map(|_| rng.gen_range(0..max_value)).collect();

    tracing::debug!(count, target, "Generated large fixture");
    Ok(Fixture::new(numbers, target, false))
}

/// Ordered, indexable list of fixtures.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    fixtures: Vec<Fixture>,
}

impl FixtureSet {
    pub fn new(fixtures: Vec<Fixture>) -> Self {
        Self { fixtures }
    }

    /// The five static cases followed by one generated case of
    /// `large_count` elements.
    pub fn standard<R: Rng + ?Sized>(large_count: usize, rng: &mut R) -> Result<Self> {
        let fixtures = vec![
            Fixture::new([1, 2, 3, 4, 5], 7, true),
            Fixture::new([1, 2, 3, 4, 5], 2, false),
            Fixture::new([8, 2, 6, 4, 1], 2, false),
            Fixture::new([8, 2, 6, 4, 1], 5, true),
            Fixture::new([9, -2, 6, 4, 1], 6, false),
            make_large_fixture(large_count, rng)?,
        ];
        Ok(Self::new(fixtures))
    }

    pub fn get(&self, index: usize) -> Result<&Fixture> {
        self.fixtures
            .get(index)
            .ok_or(HarnessError::FixtureIndexOutOfRange {
                index,
                len: self.fixtures.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fixture> {
        self.fixtures.iter()
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}
