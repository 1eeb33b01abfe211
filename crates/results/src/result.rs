//! Result types for perf c2c captures.
//!
//! A [`PerfC2cResult`] wraps one textual `perf c2c report --stats` capture
//! (or several joined captures, after aggregation) as a secondary benchmark
//! metric. The report is opaque: nothing here parses it.

use crate::aggregate::{AggregationScope, TextJoinAggregator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix the harness puts in front of secondary metric labels.
pub const LABEL_PREFIX: &str = "\u{b7}";

/// Label of the perf c2c metric family.
pub const LABEL: &str = "\u{b7}perf-c2c";

/// Unit of a single raw capture.
pub const RAW_UNIT: &str = "---";

/// Unit of an aggregated capture.
pub const AGGREGATE_UNIT: &str = "#/op";

/// Header line printed above the report text by [`PerfC2cResult::render`].
pub const RENDER_HEADER: &str = "Perf C2C report (stats):";

const RENDER_RULE_WIDTH: usize = 50;

/// How the harness treats a result when reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultRole {
    /// Primary timing metric, used for scoring.
    Primary,
    /// Supplementary metric reported next to the primary one.
    Secondary,
}

impl fmt::Display for ResultRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// One perf c2c capture, or the aggregate of several.
///
/// Values are immutable once built; aggregation always produces a new value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerfC2cResult {
    role: ResultRole,
    label: String,
    #[serde(with = "nan_as_null")]
    score: f64,
    unit: String,
    text: String,
}

impl PerfC2cResult {
    /// Wrap a single raw reporter capture. Its score is always NaN.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            role: ResultRole::Secondary,
            label: LABEL.to_string(),
            score: f64::NAN,
            unit: RAW_UNIT.to_string(),
            text: text.into(),
        }
    }

    pub(crate) fn aggregated(label: impl Into<String>, text: String, score: f64) -> Self {
        Self {
            role: ResultRole::Secondary,
            label: label.into(),
            score,
            unit: AGGREGATE_UNIT.to_string(),
            text,
        }
    }

    /// Reporting role, always [`ResultRole::Secondary`].
    pub fn role(&self) -> ResultRole {
        self.role
    }

    /// Metric family label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Score: NaN for raw captures, the mean of constituents otherwise.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Unit string.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Captured reporter output.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this value came out of an aggregation.
    pub fn is_aggregate(&self) -> bool {
        self.unit == AGGREGATE_UNIT
    }

    /// Header line, a rule, then the raw report text.
    pub fn render(&self) -> String {
        format!(
            "{}\n{}\n{}",
            RENDER_HEADER,
            "-".repeat(RENDER_RULE_WIDTH),
            self.text
        )
    }

    /// Results derived from this one. perf c2c produces none.
    pub fn derivative_results(&self) -> Vec<PerfC2cResult> {
        Vec::new()
    }

    /// Aggregator used to merge the results of measured threads in one iteration.
    pub fn thread_aggregator() -> TextJoinAggregator {
        TextJoinAggregator::new(AggregationScope::Thread)
    }

    /// Aggregator used to merge the results of iterations in one trial.
    pub fn iteration_aggregator() -> TextJoinAggregator {
        TextJoinAggregator::new(AggregationScope::Iteration)
    }
}

impl fmt::Display for PerfC2cResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("perf c2c")
    }
}

/// JSON has no NaN, so scores travel as `null`.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_some(value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_capture_fields() {
        let result = PerfC2cResult::raw("hi\n");
        assert_eq!(result.role(), ResultRole::Secondary);
        assert_eq!(result.label(), LABEL);
        assert!(result.label().starts_with(LABEL_PREFIX));
        assert!(result.score().is_nan());
        assert_eq!(result.unit(), "---");
        assert_eq!(result.text(), "hi\n");
        assert!(!result.is_aggregate());
    }

    #[test]
    fn test_render_prefixes_header() {
        let result = PerfC2cResult::raw("Total records : 42\n");
        let rendered = result.render();
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("Perf C2C report (stats):"));
        assert_eq!(lines.next(), Some("-".repeat(50).as_str()));
        assert_eq!(lines.next(), Some("Total records : 42"));
        assert!(rendered.ends_with("Total records : 42\n"));
    }

    #[test]
    fn test_display_is_short_name() {
        assert_eq!(PerfC2cResult::raw("anything").to_string(), "perf c2c");
    }

    #[test]
    fn test_no_derivative_results() {
        assert!(PerfC2cResult::raw("x").derivative_results().is_empty());
    }

    #[test]
    fn test_nan_score_survives_json() {
        let result = PerfC2cResult::raw("report");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["score"].is_null());
        assert_eq!(json["role"], "secondary");

        let back: PerfC2cResult = serde_json::from_value(json).unwrap();
        assert!(back.score().is_nan());
        assert_eq!(back.text(), "report");
    }

    #[test]
    fn test_finite_score_survives_json() {
        let result = PerfC2cResult::aggregated(LABEL, "a".to_string(), 2.5);
        let json = serde_json::to_string(&result).unwrap();
        let back: PerfC2cResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score(), 2.5);
        assert_eq!(back.unit(), AGGREGATE_UNIT);
    }
}
