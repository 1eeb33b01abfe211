// Copyright 2025 perf-c2c-profiler Contributors
// SPDX-License-Identifier: Apache-2.0

//! Harness-facing profiler interface.
//!
//! A benchmark harness forks the measured process once per trial. An external
//! profiler hooks into that cycle: it may prepend a wrapper to the process's
//! launch command, add flags to the process itself, and turn whatever it
//! collected into secondary results once the process has exited.

use crate::error::Result;
use crate::params::{TrialOutcome, TrialParams};

/// Profiler that observes the measured process from outside.
pub trait ExternalProfiler {
    /// Result type handed back to the harness.
    type Output;

    /// Tokens prepended to the measured process's launch command.
    fn launch_options(&self, params: &TrialParams) -> Result<Vec<String>>;

    /// Flags added to the measured process's own runtime options.
    fn process_options(&self, params: &TrialParams) -> Vec<String>;

    /// Called before the measured process is started.
    fn before_trial(&self, params: &TrialParams);

    /// Called after the measured process has exited.
    ///
    /// The harness must not call this while the measured process is alive.
    fn after_trial(&self, outcome: &TrialOutcome) -> Result<Vec<Self::Output>>;

    /// Whether the harness may print the measured process's stdout.
    fn allow_print_out(&self) -> bool;

    /// Whether the harness may print the measured process's stderr.
    fn allow_print_err(&self) -> bool;

    /// Human-readable description of what this profiler reports.
    fn description(&self) -> &str;
}
