//! Secondary benchmark results carrying `perf c2c` reports.
//!
//! This crate provides the typed result a perf c2c profiler hands back to a
//! benchmark harness, and the reduction the harness applies when it merges
//! results across measured threads and across iterations.
//!
//! # Quick Start
//!
//! ```
//! use perf_c2c_results::{aggregate::Aggregator, PerfC2cResult};
//!
//! let per_thread = vec![PerfC2cResult::raw("hi\n"), PerfC2cResult::raw("hi\n")];
//! let merged = PerfC2cResult::thread_aggregator().aggregate(&per_thread).unwrap();
//!
//! assert_eq!(merged.text(), "hi\n========================================\nhi\n");
//! assert!(merged.score().is_nan());
//! ```
//!
//! # Modules
//!
//! - [`result`] - The `PerfC2cResult` record
//! - [`aggregate`] - Thread and iteration aggregation
//! - [`io`] - JSON read/write of result sets
//! - [`markdown`] - Markdown report generation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod io;
pub mod markdown;
pub mod result;

pub use aggregate::{aggregate, AggregateError, AggregationScope, Aggregator, TextJoinAggregator};
pub use result::{PerfC2cResult, ResultRole};
