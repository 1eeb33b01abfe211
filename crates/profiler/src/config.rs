// Copyright 2025 perf-c2c-profiler Contributors
// SPDX-License-Identifier: Apache-2.0

//! Profiler settings.
//!
//! Every setting has a default; overrides come from `PERF_C2C_*`
//! environment variables, e.g. `PERF_C2C_PERF_BINARY=/usr/bin/perf`.

use crate::error::{ProfilerError, Result};
use config::{Config, Environment};
use serde::Deserialize;
use std::time::Duration;

/// Prefix of the environment variables read by [`ProfilerConfig::from_env`].
pub const ENV_PREFIX: &str = "PERF_C2C";

/// Default program used for both the recorder and the reporter.
pub const DEFAULT_PERF_BINARY: &str = "perf";

/// Default margin for the measured process's startup lag, in milliseconds.
pub const DEFAULT_STARTUP_MARGIN_MS: u64 = 1000;

/// Default temp-file prefix of the recording artifact.
pub const DEFAULT_ARTIFACT_PREFIX: &str = "perf-c2c-bin";

/// Settings of a perf c2c profiler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProfilerConfig {
    /// Program used for `perf c2c record` and `perf c2c report`.
    pub perf_binary: String,
    /// Added to the warmup time before the recorder starts sampling.
    pub startup_margin_ms: u64,
    /// Prefix of the temp file the recorder writes to.
    pub artifact_prefix: String,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            perf_binary: DEFAULT_PERF_BINARY.to_string(),
            startup_margin_ms: DEFAULT_STARTUP_MARGIN_MS,
            artifact_prefix: DEFAULT_ARTIFACT_PREFIX.to_string(),
        }
    }
}

impl ProfilerConfig {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an explicit set of `PERF_C2C_*` variables.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_environment(Environment::with_prefix(ENV_PREFIX).source(Some(map)))
    }

    fn from_environment(env: Environment) -> Result<Self> {
        let settings: Self = Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that cannot produce a working command line.
    pub fn validate(&self) -> Result<()> {
        if self.perf_binary.trim().is_empty() {
            return Err(ProfilerError::Configuration {
                message: "perf binary must not be empty".to_string(),
                source: None,
            });
        }
        if self.artifact_prefix.is_empty() {
            return Err(ProfilerError::Configuration {
                message: "artifact prefix must not be empty".to_string(),
                source: None,
            });
        }
        Ok(())
    }

    /// Startup margin as a duration.
    pub fn startup_margin(&self) -> Duration {
        Duration::from_millis(self.startup_margin_ms)
    }
}
