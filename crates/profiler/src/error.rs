// Copyright 2025 perf-c2c-profiler Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the perf c2c profiler.

use std::io;
use thiserror::Error;

/// Errors that can occur while profiling a trial.
#[derive(Debug, Error)]
pub enum ProfilerError {
    /// The profiler could not be set up: no recording artifact could be
    /// allocated, or the configuration is invalid. Raised before any trial runs.
    #[error("Profiler configuration error: {message}")]
    Configuration {
        /// What could not be set up.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The reporter process could not be started or its output not read.
    #[error("Failed to run `{command}`: {source}")]
    ToolInvocation {
        /// Rendered command line.
        command: String,
        /// Spawn or read failure.
        #[source]
        source: io::Error,
    },
}

impl ProfilerError {
    /// Build a configuration error from an underlying cause.
    pub fn configuration(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Build a tool invocation error for the given rendered command line.
    pub fn tool_invocation(command: impl Into<String>, source: io::Error) -> Self {
        Self::ToolInvocation {
            command: command.into(),
            source,
        }
    }

    /// Whether this error happened before any trial could run.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

impl From<config::ConfigError> for ProfilerError {
    fn from(err: config::ConfigError) -> Self {
        Self::configuration("invalid profiler settings", err)
    }
}

/// Result type for profiler operations.
pub type Result<T> = std::result::Result<T, ProfilerError>;
