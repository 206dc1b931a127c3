//! Two-sum search variants
//!
//! Every variant answers the same question: does any pair of elements at
//! distinct positions in `numbers` add up to `target`?
//!
//! Sums and complements are computed in `i64`, so no `i32` input can
//! overflow. Duplicated values count as a pair only when they occur at two
//! positions: `[5]` with target 10 is `false`, `[5, 5]` is `true`.

use crate::error::HarnessError;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature shared by all variants.
pub type ContainsSumFn = fn(&[i32], i32) -> bool;

/// Baseline: every ordered pair `(i, j)` with `i != j`.
///
/// Checks both `(i, j)` and `(j, i)`. The redundancy is kept on purpose,
/// this is the reference point every other variant is measured against.
pub fn contains_sum_double_loop(numbers: &[i32], target: i32) -> bool {
    let target = target as i64;
    for i in 0..numbers.len() {
        for j in 0..numbers.len() {
            if i == j {
                continue;
            }
            if numbers[i] as i64 + numbers[j] as i64 == target {
                return true;
            }
        }
    }
    false
}

/// Pairs `i < j` only: half the comparisons of the baseline.
pub fn contains_sum_double_loop_optimized(numbers: &[i32], target: i32) -> bool {
    let target = target as i64;
    for (i, &a) in numbers.iter().enumerate() {
        for &b in &numbers[i + 1..] {
            if a as i64 + b as i64 == target {
                return true;
            }
        }
    }
    false
}

/// Sort a private copy, then binary-search each complement in the suffix
/// strictly after the current index.
///
/// The search window `sorted[i + 1..]` never contains position `i`, so a
/// lone `v` cannot satisfy `target == 2 * v`. The caller's slice is untouched.
pub fn contains_sum_binary_search(numbers: &[i32], target: i32) -> bool {
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();

    for i in 0..sorted.len().saturating_sub(1) {
        let Some(complement) = complement_of(target, sorted[i]) else {
            continue;
        };
        if sorted[i + 1..].binary_search(&complement).is_ok() {
            return true;
        }
    }
    false
}

/// One pass with a set of values seen so far.
///
/// The lookup happens before the insert, so an element never pairs with itself.
pub fn contains_sum_linear_hash_set(numbers: &[i32], target: i32) -> bool {
    let mut seen: FxHashSet<i32> = FxHashSet::default();

    for &number in numbers {
        if complement_of(target, number).is_some_and(|c| seen.contains(&c)) {
            return true;
        }
        seen.insert(number);
    }
    false
}

/// Same walk as [`contains_sum_linear_hash_set`], keyed presence in a map.
pub fn contains_sum_linear_dictionary(numbers: &[i32], target: i32) -> bool {
    let mut seen: FxHashMap<i32, bool> = FxHashMap::default();

    for &number in numbers {
        if complement_of(target, number).is_some_and(|c| seen.contains_key(&c)) {
            return true;
        }
        seen.insert(number, false);
    }
    false
}

/// `target - value`, or `None` when the complement cannot be an `i32`
/// (and therefore cannot be present in the input).
#[inline]
fn complement_of(target: i32, value: i32) -> Option<i32> {
    i32::try_from(target as i64 - value as i64).ok()
}

/// The five variants under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    DoubleLoop,
    DoubleLoopOptimized,
    BinarySearch,
    LinearHashSet,
    LinearDictionary,
}

impl Algorithm {
    /// All variants, in report order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::DoubleLoop,
        Algorithm::DoubleLoopOptimized,
        Algorithm::BinarySearch,
        Algorithm::LinearHashSet,
        Algorithm::LinearDictionary,
    ];

    /// Reference point for relative timings.
    pub const BASELINE: Algorithm = Algorithm::DoubleLoop;

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::DoubleLoop => "ContainsSumDoubleLoop",
            Algorithm::DoubleLoopOptimized => "ContainsSumDoubleLoopOptimized",
            Algorithm::BinarySearch => "ContainsSumBinarySearch",
            Algorithm::LinearHashSet => "ContainsSumLinearHashSet",
            Algorithm::LinearDictionary => "ContainsSumLinearDictionary",
        }
    }

    pub fn func(&self) -> ContainsSumFn {
        match self {
            Algorithm::DoubleLoop => contains_sum_double_loop,
            Algorithm::DoubleLoopOptimized => contains_sum_double_loop_optimized,
            Algorithm::BinarySearch => contains_sum_binary_search,
            Algorithm::LinearHashSet => contains_sum_linear_hash_set,
            Algorithm::LinearDictionary => contains_sum_linear_dictionary,
        }
    }

    #[inline]
    pub fn contains_sum(&self, numbers: &[i32], target: i32) -> bool {
        (self.func())(numbers, target)
    }

    pub fn is_baseline(&self) -> bool {
        *self == Self::BASELINE
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = HarnessError;

    /// Accepts the full report name (`ContainsSumBinarySearch`) or the
    /// variant name (`BinarySearch`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Algorithm::ALL
            .into_iter()
            .find(|a| {
                a.name().eq_ignore_ascii_case(wanted)
                    || a.name()["ContainsSum".len()..].eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| HarnessError::UnknownAlgorithm(s.to_string()))
    }
}
