//! Coalescing Strategies
//!
//! Pure reduction rules that collapse the values collected across providers
//! into a single number per field.
//!
//! # Which strategy when?
//! - `average`: smooths disagreement between sources, overall estimate
//! - `min`: most conservative value (e.g. lowest quoted cost)
//! - `max`: worst-case value (e.g. highest reported liability)
//! - `median`: central value that outliers cannot skew
//!
//! All arithmetic is integer arithmetic: `average` (and the even-length
//! `median` case) truncate toward zero rather than round.

use std::str::FromStr;

use crate::error::{CoalesceError, Result};

/// A rule reducing a non-empty list of integers to one integer
///
/// The registry is fixed and small, so the variants are a closed enum rather
/// than an open trait hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoalesceStrategy {
    Average,
    Min,
    Max,
    Median,
}

impl CoalesceStrategy {
    /// Registry name of the strategy
    pub fn name(&self) -> &'static str {
        match self {
            CoalesceStrategy::Average => "average",
            CoalesceStrategy::Min => "min",
            CoalesceStrategy::Max => "max",
            CoalesceStrategy::Median => "median",
        }
    }

    /// Reduce `values` to a single number
    ///
    /// # Errors
    /// `EmptyValues` if called with no values. The coalescer never applies a
    /// strategy to an empty list, so this surfacing means a caller bug.
    ///
    /// # Example
    /// ```text
    /// average [10000, 20000, 15000] -> 15000
    /// median  [7000, 10000, 15000, 20000] -> 12500
    /// ```
    pub fn apply(&self, values: &[i64]) -> Result<i64> {
        if values.is_empty() {
            return Err(CoalesceError::EmptyValues);
        }

        let result = match self {
            CoalesceStrategy::Average => values.iter().sum::<i64>() / values.len() as i64,
            CoalesceStrategy::Min => values.iter().copied().min().ok_or(CoalesceError::EmptyValues)?,
            CoalesceStrategy::Max => values.iter().copied().max().ok_or(CoalesceError::EmptyValues)?,
            CoalesceStrategy::Median => median(values),
        };

        Ok(result)
    }
}

/// Middle element of the sorted values; for an even count, the truncating
/// average of the two middle elements.
fn median(values: &[i64]) -> i64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let len = sorted.len();
    if len % 2 == 1 {
        sorted[len / 2]
    } else {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2
    }
}

impl FromStr for CoalesceStrategy {
    type Err = CoalesceError;

    /// Resolve a strategy name against the fixed registry
    ///
    /// Unknown names are rejected rather than silently downgraded to a
    /// default; the caller decides what a bad name means for the request.
    fn from_str(name: &str) -> Result<Self> {
        match name {
            "average" => Ok(CoalesceStrategy::Average),
            "min" => Ok(CoalesceStrategy::Min),
            "max" => Ok(CoalesceStrategy::Max),
            "median" => Ok(CoalesceStrategy::Median),
            other => Err(CoalesceError::UnknownStrategy(other.to_string())),
        }
    }
}
