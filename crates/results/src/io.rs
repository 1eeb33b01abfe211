//! I/O operations for perf c2c results.
//!
//! Results are exchanged as pretty-printed JSON arrays so captures taken in
//! one process can be aggregated or reported from another.

use crate::markdown;
use crate::result::PerfC2cResult;
use std::fs;
use std::io;
use std::path::Path;

/// File name of the combined JSON results inside an output directory.
pub const RESULTS_FILE: &str = "results.json";

/// File name of the markdown summary inside an output directory.
pub const SUMMARY_FILE: &str = "summary.md";

/// File name of the detailed markdown report inside an output directory.
pub const REPORT_FILE: &str = "report.md";

/// Write results to a JSON file.
pub fn write_results_json(results: &[PerfC2cResult], path: impl AsRef<Path>) -> io::Result<()> {
    let json = serde_json::to_string_pretty(results).map_err(io::Error::other)?;
    fs::write(path, json)
}

/// Read results from a JSON file.
///
/// Accepts either an array of results or a single result object.
pub fn read_results_json(path: impl AsRef<Path>) -> io::Result<Vec<PerfC2cResult>> {
    let content = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content).map_err(io::Error::other)?;
    if value.is_array() {
        serde_json::from_value(value).map_err(io::Error::other)
    } else {
        serde_json::from_value(value)
            .map(|single| vec![single])
            .map_err(io::Error::other)
    }
}

/// Write JSON results, summary, and detailed report into `dir`.
pub fn write_all_outputs(results: &[PerfC2cResult], dir: impl AsRef<Path>) -> io::Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    write_results_json(results, dir.join(RESULTS_FILE))?;
    fs::write(dir.join(SUMMARY_FILE), markdown::generate_summary(results))?;
    fs::write(
        dir.join(REPORT_FILE),
        markdown::generate_detailed_report(results),
    )?;

    Ok(())
}
