//! CLI for the perf c2c profiler.
//!
//! This crate lets a script-driven benchmark harness use the profiler
//! without linking it: print the recorder wrapper for a trial, run the
//! reporter once the measured process has exited, and merge saved results.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use perf_c2c_profiler::artifact::FixedArtifact;
use perf_c2c_profiler::runner::SystemRunner;
use perf_c2c_profiler::{
    ExternalProfiler, IterationParams, PerfC2cProfiler, ProfilerConfig, TrialOutcome, TrialParams,
};
use perf_c2c_results::io::{read_results_json, write_all_outputs, write_results_json};
use perf_c2c_results::{Aggregator, PerfC2cResult};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// perf c2c profiler CLI.
#[derive(Parser, Debug)]
#[command(name = "perf-c2c")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the recorder wrapper to prepend to the measured process's
    /// command line, one token per line.
    LaunchOptions {
        /// Recording file the recorder writes to.
        #[arg(short, long)]
        artifact: PathBuf,

        /// Number of warmup iterations.
        #[arg(long, default_value_t = 0)]
        warmup_iterations: u64,

        /// Duration of one warmup iteration, in milliseconds.
        #[arg(long, default_value_t = 0)]
        warmup_time_ms: u64,

        /// Benchmark name, for logging.
        #[arg(short, long, default_value = "benchmark")]
        benchmark: String,
    },

    /// Run `perf c2c report --stats` on a recording and print the result.
    Report {
        /// Recording file written by the recorder.
        #[arg(short, long)]
        artifact: PathBuf,

        /// Process id of the measured process, for logging.
        #[arg(long, default_value_t = 0)]
        pid: u32,

        /// Also write the result as JSON to this file.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Merge saved JSON results into one.
    Aggregate {
        /// JSON result files, merged in the given order.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write results.json, summary.md and report.md into this directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Describe what the profiler reports.
    Describe,
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &mut out)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber installed by an embedding process wins.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn profiler_at(artifact: &Path) -> Result<PerfC2cProfiler<FixedArtifact, SystemRunner>> {
    let config = ProfilerConfig::from_env().context("loading PERF_C2C_* settings")?;
    Ok(PerfC2cProfiler::with_parts(
        config,
        FixedArtifact::new(artifact),
        SystemRunner,
    ))
}

/// Execute one command, writing its primary output to `out`.
pub fn execute(command: Commands, out: &mut impl Write) -> Result<()> {
    debug!(command = ?command, "Running perf-c2c command");
    match command {
        Commands::LaunchOptions {
            artifact,
            warmup_iterations,
            warmup_time_ms,
            benchmark,
        } => {
            let params = TrialParams::new(
                benchmark,
                IterationParams::new(warmup_iterations, Duration::from_millis(warmup_time_ms)),
            );
            let tokens = profiler_at(&artifact)?.launch_options(&params)?;
            for token in tokens {
                writeln!(out, "{}", token)?;
            }
            Ok(())
        }
        Commands::Report {
            artifact,
            pid,
            json,
        } => {
            let profiler = profiler_at(&artifact)?;
            let outcome = TrialOutcome {
                pid,
                stdout: PathBuf::new(),
                stderr: PathBuf::new(),
            };
            let results = profiler.after_trial(&outcome)?;
            for result in &results {
                write!(out, "{}", result.render())?;
            }
            if let Some(path) = json {
                write_results_json(&results, &path)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            Ok(())
        }
        Commands::Aggregate { inputs, output } => {
            let mut collected = Vec::new();
            for input in &inputs {
                let results = read_results_json(input)
                    .with_context(|| format!("reading {}", input.display()))?;
                collected.extend(results);
            }
            let merged = PerfC2cResult::iteration_aggregator().aggregate(&collected)?;
            write!(out, "{}", merged.render())?;
            if let Some(dir) = output {
                write_all_outputs(std::slice::from_ref(&merged), &dir)
                    .with_context(|| format!("writing outputs to {}", dir.display()))?;
            }
            Ok(())
        }
        Commands::Describe => {
            let profiler = PerfC2cProfiler::with_config(ProfilerConfig::default())?;
            writeln!(out, "{}", profiler.description())?;
            Ok(())
        }
    }
}
