// Copyright 2025 perf-c2c-profiler Contributors
// SPDX-License-Identifier: Apache-2.0

//! Running the external reporter and capturing its output.

use std::fmt;
use std::io::{self, Read};
use std::process::{Command, Stdio};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    /// Start a command line with `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program to run.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, in order.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// Program followed by its arguments.
    pub fn into_tokens(self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.args.len() + 1);
        tokens.push(self.program);
        tokens.extend(self.args);
        tokens
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Output of a finished reporter process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Interleaved stdout and stderr, one `\n` after every line.
    pub output: String,
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

/// Runs a command to completion and captures its combined output.
#[cfg_attr(test, mockall::automock)]
pub trait ReportRunner {
    /// Spawn `command`, read its merged stdout and stderr until end of
    /// stream, then reap it. Blocks the calling thread.
    fn capture(&self, command: &ToolCommand) -> io::Result<Capture>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ReportRunner for SystemRunner {
    fn capture(&self, command: &ToolCommand) -> io::Result<Capture> {
        let (mut reader, writer) = io::pipe()?;

        // The Command (and its copies of the write end) must be gone before
        // reading, or the read never sees end of stream.
        let mut child = Command::new(command.program())
            .args(command.arguments())
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer)
            .spawn()?;

        let mut raw = Vec::new();
        let read = reader.read_to_end(&mut raw);
        let status = child.wait()?;
        read?;

        Ok(Capture {
            output: normalize_lines(&String::from_utf8_lossy(&raw)),
            exit_code: status.code(),
        })
    }
}

/// Terminate every line with a single `\n`, dropping `\r\n` endings.
pub fn normalize_lines(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        output.push_str(line);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_and_tokens() {
        let command = ToolCommand::new("perf")
            .args(["c2c", "report", "--stats"])
            .arg("-i")
            .arg("/tmp/perf-c2c-bin123");

        assert_eq!(
            command.to_string(),
            "perf c2c report --stats -i /tmp/perf-c2c-bin123"
        );
        assert_eq!(command.program(), "perf");
        assert_eq!(command.arguments().len(), 5);
        assert_eq!(
            command.into_tokens(),
            vec!["perf", "c2c", "report", "--stats", "-i", "/tmp/perf-c2c-bin123"]
        );
    }

    #[test]
    fn test_normalize_lines() {
        assert_eq!(normalize_lines("a\r\nb"), "a\nb\n");
        assert_eq!(normalize_lines("hi\n"), "hi\n");
        assert_eq!(normalize_lines(""), "");
        assert_eq!(normalize_lines("\n\n"), "\n\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_merges_streams() {
        let command = ToolCommand::new("sh").args(["-c", "echo out; echo err 1>&2; exit 3"]);
        let capture = SystemRunner.capture(&command).unwrap();

        assert!(capture.output.contains("out\n"));
        assert!(capture.output.contains("err\n"));
        assert_eq!(capture.exit_code, Some(3));
    }

    #[test]
    fn test_system_runner_missing_program() {
        let command = ToolCommand::new("perf-c2c-definitely-not-installed");
        let err = SystemRunner.capture(&command).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
