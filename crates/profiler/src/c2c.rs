// Copyright 2025 perf-c2c-profiler Contributors
// SPDX-License-Identifier: Apache-2.0

//! The `perf c2c` profiler.
//!
//! `perf c2c record` wraps the measured process and samples cache-coherence
//! events into a recording artifact, starting only once warmup is over.
//! After the trial, `perf c2c report --stats` reads the artifact back and its
//! output becomes one secondary [`PerfC2cResult`].
//!
//! # Example
//!
//! ```no_run
//! use perf_c2c_profiler::{ExternalProfiler, IterationParams, PerfC2cProfiler, TrialParams};
//! use std::time::Duration;
//!
//! let profiler = PerfC2cProfiler::new()?;
//! let params = TrialParams::new("bench.falseSharing", IterationParams::new(5, Duration::from_secs(1)));
//!
//! // perf c2c record -o /tmp/perf-c2c-bin... -- --delay 6000
//! let wrapper = profiler.launch_options(&params)?;
//! # let _ = wrapper;
//! # Ok::<(), perf_c2c_profiler::ProfilerError>(())
//! ```

use crate::artifact::{RecordingArtifact, TempFileAllocator, WeakTempFiles};
use crate::config::ProfilerConfig;
use crate::error::{ProfilerError, Result};
use crate::params::{IterationParams, TrialOutcome, TrialParams};
use crate::profiler::ExternalProfiler;
use crate::runner::{ReportRunner, SystemRunner, ToolCommand};
use once_cell::sync::OnceCell;
use perf_c2c_results::PerfC2cResult;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Description reported to the harness.
pub const DESCRIPTION: &str = "Linux perf cache to cache (c2c) statistics";

const NANOS_PER_MILLI: u128 = 1_000_000;

/// Milliseconds the recorder waits before sampling: the whole warmup phase,
/// rounded up, plus `margin` for the measured process's startup.
pub fn recording_delay_ms(warmup: &IterationParams, margin: Duration) -> u128 {
    warmup
        .total_nanos()
        .div_ceil(NANOS_PER_MILLI)
        .saturating_add(margin.as_millis())
}

/// Attaches `perf c2c` to one trial of a measured process.
///
/// One instance owns one recording artifact, allocated on first use and
/// shared by the recorder and the reporter.
#[derive(Debug)]
pub struct PerfC2cProfiler<A = WeakTempFiles, R = SystemRunner> {
    config: ProfilerConfig,
    allocator: A,
    runner: R,
    artifact: OnceCell<RecordingArtifact>,
}

impl PerfC2cProfiler {
    /// Profiler configured from `PERF_C2C_*` environment variables.
    pub fn new() -> Result<Self> {
        Self::with_config(ProfilerConfig::from_env()?)
    }

    /// Profiler with explicit settings.
    pub fn with_config(config: ProfilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_parts(config, WeakTempFiles::new(), SystemRunner))
    }
}

impl<A, R> PerfC2cProfiler<A, R>
where
    A: TempFileAllocator,
    R: ReportRunner,
{
    /// Profiler with a custom artifact allocator and reporter runner.
    pub fn with_parts(config: ProfilerConfig, allocator: A, runner: R) -> Self {
        Self {
            config,
            allocator,
            runner,
            artifact: OnceCell::new(),
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// The recording artifact, allocated on first call.
    pub fn artifact(&self) -> Result<&RecordingArtifact> {
        self.artifact.get_or_try_init(|| {
            let artifact = self
                .allocator
                .allocate_weak(&self.config.artifact_prefix)
                .map_err(|e| {
                    ProfilerError::configuration("cannot allocate recording artifact", e)
                })?;
            debug!(
                path = %artifact.path().display(),
                temporary = artifact.is_temporary(),
                "Allocated recording artifact"
            );
            Ok(artifact)
        })
    }

    fn artifact_arg(&self) -> Result<String> {
        Ok(self.artifact()?.path().to_string_lossy().into_owned())
    }

    /// `perf c2c record` wrapper for the measured process.
    pub fn record_command(&self, params: &TrialParams) -> Result<ToolCommand> {
        let delay = recording_delay_ms(&params.warmup, self.config.startup_margin());
        Ok(ToolCommand::new(self.config.perf_binary.as_str())
            .args(["c2c", "record", "-o"])
            .arg(self.artifact_arg()?)
            .args(["--", "--delay"])
            .arg(delay.to_string()))
    }

    /// `perf c2c report` invocation reading the recording back.
    pub fn report_command(&self) -> Result<ToolCommand> {
        Ok(ToolCommand::new(self.config.perf_binary.as_str())
            .args(["c2c", "report", "--stats", "-i"])
            .arg(self.artifact_arg()?))
    }
}

impl<A, R> ExternalProfiler for PerfC2cProfiler<A, R>
where
    A: TempFileAllocator,
    R: ReportRunner,
{
    type Output = PerfC2cResult;

    fn launch_options(&self, params: &TrialParams) -> Result<Vec<String>> {
        let command = self.record_command(params)?;
        info!(
            benchmark = %params.benchmark,
            command = %command,
            "Attaching perf c2c recorder"
        );
        Ok(command.into_tokens())
    }

    fn process_options(&self, _params: &TrialParams) -> Vec<String> {
        Vec::new()
    }

    fn before_trial(&self, _params: &TrialParams) {}

    fn after_trial(&self, outcome: &TrialOutcome) -> Result<Vec<PerfC2cResult>> {
        let command = self.report_command()?;
        debug!(pid = outcome.pid, command = %command, "Running perf c2c reporter");

        let capture = self
            .runner
            .capture(&command)
            .map_err(|e| ProfilerError::tool_invocation(command.to_string(), e))?;

        if capture.exit_code != Some(0) {
            warn!(
                command = %command,
                exit_code = ?capture.exit_code,
                "perf c2c reporter exited unsuccessfully, keeping its output"
            );
        }
        info!(
            pid = outcome.pid,
            bytes = capture.output.len(),
            "Captured perf c2c report"
        );

        Ok(vec![PerfC2cResult::raw(capture.output)])
    }

    fn allow_print_out(&self) -> bool {
        false
    }

    fn allow_print_err(&self) -> bool {
        false
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }
}
