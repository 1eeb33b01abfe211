// Copyright 2025 perf-c2c-profiler Contributors
// SPDX-License-Identifier: Apache-2.0

//! `perf c2c` false-sharing profiler for benchmark harnesses.
//!
//! This crate attaches Linux `perf c2c` to a single benchmark trial: it
//! supplies the recorder wrapper the harness prepends to the measured
//! process's launch command, and after the trial turns the textual
//! `perf c2c report --stats` output into a secondary result.
//!
//! # Modules
//!
//! - [`profiler`] - The `ExternalProfiler` harness interface
//! - [`c2c`] - The perf c2c implementation
//! - [`params`] - Trial inputs supplied by the harness
//! - [`artifact`] - Recording file allocation
//! - [`runner`] - Reporter process execution
//! - [`config`] - Settings loaded from the environment
//! - [`error`] - Error taxonomy

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod artifact;
pub mod c2c;
pub mod config;
pub mod error;
pub mod params;
pub mod profiler;
pub mod runner;

pub use c2c::PerfC2cProfiler;
pub use config::ProfilerConfig;
pub use error::{ProfilerError, Result};
pub use params::{IterationParams, TrialOutcome, TrialParams};
pub use profiler::ExternalProfiler;
