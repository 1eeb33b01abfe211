use perf_c2c_profiler::artifact::WeakTempFiles;
use perf_c2c_profiler::runner::{Capture, ReportRunner, ToolCommand};
use perf_c2c_profiler::{
    ExternalProfiler, IterationParams, PerfC2cProfiler, ProfilerConfig, TrialOutcome, TrialParams,
};
use perf_c2c_results::{Aggregator, PerfC2cResult};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// Replays a fixed report and remembers what it was asked to run.
struct CannedReporter {
    output: &'static str,
    seen: Mutex<Vec<ToolCommand>>,
}

impl CannedReporter {
    fn new(output: &'static str) -> Self {
        Self {
            output,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl ReportRunner for CannedReporter {
    fn capture(&self, command: &ToolCommand) -> io::Result<Capture> {
        self.seen.lock().unwrap().push(command.clone());
        Ok(Capture {
            output: self.output.to_string(),
            exit_code: Some(0),
        })
    }
}

fn outcome() -> TrialOutcome {
    TrialOutcome {
        pid: 1,
        stdout: PathBuf::from("/dev/null"),
        stderr: PathBuf::from("/dev/null"),
    }
}

#[test]
fn test_trial_without_warmup_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let profiler = PerfC2cProfiler::with_parts(
        ProfilerConfig::default(),
        WeakTempFiles::in_dir(dir.path()),
        CannedReporter::new("hi\n"),
    );
    let params = TrialParams::new(
        "bench.contended",
        IterationParams::new(0, Duration::from_secs(1)),
    );

    let launch = profiler.launch_options(&params).unwrap();
    assert_eq!(&launch[..4], ["perf", "c2c", "record", "-o"]);
    assert_eq!(&launch[5..], ["--", "--delay", "1000"]);
    let artifact = PathBuf::from(&launch[4]);
    assert!(artifact.starts_with(dir.path()));
    assert!(profiler.process_options(&params).is_empty());

    profiler.before_trial(&params);
    let first = profiler.after_trial(&outcome()).unwrap();
    let second = profiler.after_trial(&outcome()).unwrap();

    assert_eq!(first.len(), 1);
    assert_eq!(first[0].text(), "hi\n");
    assert!(first[0].score().is_nan());

    let merged = PerfC2cResult::iteration_aggregator()
        .aggregate(&[first[0].clone(), second[0].clone()])
        .unwrap();
    assert_eq!(merged.text(), "hi\n========================================\nhi\n");
    assert!(merged.score().is_nan());
}

#[test]
fn test_reporter_reads_recorder_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let reporter = CannedReporter::new("Total records : 0\n");
    let profiler = PerfC2cProfiler::with_parts(
        ProfilerConfig::default(),
        WeakTempFiles::in_dir(dir.path()),
        reporter,
    );
    let params = TrialParams::new("bench", IterationParams::new(2, Duration::from_millis(500)));

    let launch = profiler.launch_options(&params).unwrap();
    profiler.after_trial(&outcome()).unwrap();

    let report = profiler.report_command().unwrap();
    assert_eq!(
        report.arguments(),
        ["c2c", "report", "--stats", "-i", launch[4].as_str()]
    );
    assert_eq!(launch[7], "2000");
}

#[cfg(unix)]
#[test]
fn test_real_process_output_is_captured() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProfilerConfig {
        perf_binary: "echo".to_string(),
        ..ProfilerConfig::default()
    };
    let profiler = PerfC2cProfiler::with_parts(
        config,
        WeakTempFiles::in_dir(dir.path()),
        perf_c2c_profiler::runner::SystemRunner,
    );

    let artifact = profiler.artifact().unwrap().path().to_string_lossy().into_owned();
    let results = profiler.after_trial(&outcome()).unwrap();

    assert_eq!(
        results[0].text(),
        format!("c2c report --stats -i {artifact}\n")
    );
}
