//! Aggregation of perf c2c results.
//!
//! The harness merges results bottom-up: first across measured threads of one
//! iteration, then across iterations of one trial. Both scopes use the same
//! reduction: texts are joined in input order with [`SEPARATOR`] and scores
//! are averaged.

use crate::result::PerfC2cResult;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Line inserted between two joined captures. A newline is put in front of
/// it when the preceding capture does not end with one.
pub const SEPARATOR: &str = "========================================\n";

/// Errors that can occur while aggregating results.
#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    /// Nothing to aggregate.
    #[error("Cannot aggregate an empty result collection")]
    Empty,

    /// Inputs belong to different metric families.
    #[error("Cannot aggregate results of different families: {expected} and {actual}")]
    MixedFamilies {
        /// Label of the first input.
        expected: String,
        /// First label that differs from it.
        actual: String,
    },
}

/// Granularity at which the harness drives an aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationScope {
    /// Across measured threads within one iteration.
    Thread,
    /// Across iterations within one trial.
    Iteration,
}

impl fmt::Display for AggregationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thread => write!(f, "thread"),
            Self::Iteration => write!(f, "iteration"),
        }
    }
}

/// Reduces a collection of results into one.
pub trait Aggregator<R> {
    /// Merge `results` into a single new value. Inputs are left untouched.
    fn aggregate(&self, results: &[R]) -> Result<R, AggregateError>;
}

/// The only aggregator perf c2c results support: join texts, average scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextJoinAggregator {
    scope: AggregationScope,
}

impl TextJoinAggregator {
    /// Create an aggregator for the given scope.
    pub fn new(scope: AggregationScope) -> Self {
        Self { scope }
    }

    /// The scope this aggregator was declared for.
    pub fn scope(&self) -> AggregationScope {
        self.scope
    }
}

impl Aggregator<PerfC2cResult> for TextJoinAggregator {
    fn aggregate(&self, results: &[PerfC2cResult]) -> Result<PerfC2cResult, AggregateError> {
        let merged = aggregate(results)?;
        debug!(
            scope = %self.scope,
            inputs = results.len(),
            bytes = merged.text().len(),
            "Aggregated perf c2c results"
        );
        Ok(merged)
    }
}

/// Join the texts of `results` and average their scores.
///
/// A NaN score in any input makes the mean NaN.
pub fn aggregate(results: &[PerfC2cResult]) -> Result<PerfC2cResult, AggregateError> {
    let first = results.first().ok_or(AggregateError::Empty)?;

    if let Some(other) = results.iter().find(|r| r.label() != first.label()) {
        return Err(AggregateError::MixedFamilies {
            expected: first.label().to_string(),
            actual: other.label().to_string(),
        });
    }

    let mut joined = String::with_capacity(
        results.iter().map(|r| r.text().len() + SEPARATOR.len() + 1).sum(),
    );
    for (index, result) in results.iter().enumerate() {
        if index > 0 {
            if !joined.is_empty() && !joined.ends_with('\n') {
                joined.push('\n');
            }
            joined.push_str(SEPARATOR);
        }
        joined.push_str(result.text());
    }

    let mean = results.iter().map(PerfC2cResult::score).sum::<f64>() / results.len() as f64;

    Ok(PerfC2cResult::aggregated(first.label(), joined, mean))
}
