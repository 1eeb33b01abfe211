// Copyright 2025 perf-c2c-profiler Contributors
// SPDX-License-Identifier: Apache-2.0

//! Trial inputs supplied by the benchmark harness.

use std::path::PathBuf;
use std::time::Duration;

/// Iteration settings of one benchmark phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationParams {
    /// Number of iterations in the phase.
    pub count: u64,
    /// Duration of each iteration.
    pub time: Duration,
}

impl IterationParams {
    /// Create iteration settings.
    pub fn new(count: u64, time: Duration) -> Self {
        Self { count, time }
    }

    /// Total nominal duration of the phase, in nanoseconds.
    pub fn total_nanos(&self) -> u128 {
        u128::from(self.count).saturating_mul(self.time.as_nanos())
    }
}

/// Benchmark parameters of the trial about to be launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialParams {
    /// Benchmark identifier, used for logging only.
    pub benchmark: String,
    /// Warmup phase settings.
    pub warmup: IterationParams,
}

impl TrialParams {
    /// Create trial parameters.
    pub fn new(benchmark: impl Into<String>, warmup: IterationParams) -> Self {
        Self {
            benchmark: benchmark.into(),
            warmup,
        }
    }
}

/// What the harness knows once the measured process has exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    /// Process id of the measured process.
    pub pid: u32,
    /// File holding the measured process's stdout.
    pub stdout: PathBuf,
    /// File holding the measured process's stderr.
    pub stderr: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_nanos() {
        let warmup = IterationParams::new(5, Duration::from_millis(10));
        assert_eq!(warmup.total_nanos(), 50_000_000);
    }

    #[test]
    fn test_total_nanos_saturates() {
        let warmup = IterationParams::new(u64::MAX, Duration::from_secs(u64::MAX));
        assert_eq!(warmup.total_nanos(), u128::MAX);
    }
}
