//! Markdown output generation for perf c2c results.
//!
//! The report text is opaque, so the summary only lists per-result metadata;
//! the detailed report embeds every capture verbatim.

use crate::result::PerfC2cResult;
use std::fmt::Write;

/// Generate a markdown summary table from perf c2c results.
pub fn generate_summary(results: &[PerfC2cResult]) -> String {
    let mut output = String::new();

    writeln!(output, "# perf c2c Summary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();
    writeln!(output, "## Results").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "| Label | Role | Score | Unit | Report lines |").unwrap();
    writeln!(output, "|-------|------|-------|------|--------------|").unwrap();

    for result in results {
        writeln!(
            output,
            "| {} | {} | {} | {} | {} |",
            result.label(),
            result.role(),
            format_score(result.score()),
            result.unit(),
            result.text().lines().count()
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total results: {}", results.len()).unwrap();

    output
}

/// Generate detailed markdown report with every capture embedded.
pub fn generate_detailed_report(results: &[PerfC2cResult]) -> String {
    let mut output = String::new();

    writeln!(output, "# Detailed perf c2c Report").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339()).unwrap();
    writeln!(output).unwrap();

    for (index, result) in results.iter().enumerate() {
        writeln!(output, "## {} #{}", result, index + 1).unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "**Score:** {} {}",
            format_score(result.score()),
            result.unit()
        )
        .unwrap();
        writeln!(output).unwrap();
        writeln!(output, "```text").unwrap();
        write!(output, "{}", result.render()).unwrap();
        if !result.text().ends_with('\n') {
            writeln!(output).unwrap();
        }
        writeln!(output, "```").unwrap();
        writeln!(output).unwrap();
    }

    output
}

fn format_score(score: f64) -> String {
    if score.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.3}", score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;

    #[test]
    fn test_summary_lists_each_result() {
        let results = vec![PerfC2cResult::raw("a\nb\n"), PerfC2cResult::raw("c\n")];
        let summary = generate_summary(&results);

        assert!(summary.contains("| \u{b7}perf-c2c | secondary | NaN | --- | 2 |"));
        assert!(summary.contains("| \u{b7}perf-c2c | secondary | NaN | --- | 1 |"));
        assert!(summary.contains("Total results: 2"));
    }

    #[test]
    fn test_detailed_report_embeds_text() {
        let merged = aggregate(&[PerfC2cResult::raw("first\n"), PerfC2cResult::raw("second")]).unwrap();
        let report = generate_detailed_report(&[merged]);

        assert!(report.contains("## perf c2c #1"));
        assert!(report.contains("Perf C2C report (stats):"));
        assert!(report.contains("first\n========================================\nsecond\n```"));
    }
}
