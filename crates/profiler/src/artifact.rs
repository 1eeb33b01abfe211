// Copyright 2025 perf-c2c-profiler Contributors
// SPDX-License-Identifier: Apache-2.0

//! Recording artifact: the binary file `perf c2c record` writes and
//! `perf c2c report` reads back.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

/// Path to a recording file, optionally backed by a temp file.
///
/// A temp-backed artifact is removed when dropped. Removal is best-effort:
/// failures are ignored and a killed process leaves the file behind.
#[derive(Debug)]
pub struct RecordingArtifact {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl RecordingArtifact {
    /// Wrap a temp file that is deleted when the artifact is dropped.
    pub fn temporary(temp: TempPath) -> Self {
        Self {
            path: temp.to_path_buf(),
            temp: Some(temp),
        }
    }

    /// Bind to a caller-chosen path. The file is never deleted.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            temp: None,
        }
    }

    /// Location of the recording file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file is removed on drop.
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }
}

/// Allocates recording artifacts.
#[cfg_attr(test, mockall::automock)]
pub trait TempFileAllocator {
    /// Allocate a fresh artifact whose file name starts with `prefix`.
    fn allocate_weak(&self, prefix: &str) -> io::Result<RecordingArtifact>;
}

/// Allocates weak temp files in the system temp directory, or in `dir`.
#[derive(Debug, Clone, Default)]
pub struct WeakTempFiles {
    dir: Option<PathBuf>,
}

impl WeakTempFiles {
    /// Allocate under the system temp directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate under `dir` instead.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl TempFileAllocator for WeakTempFiles {
    fn allocate_weak(&self, prefix: &str) -> io::Result<RecordingArtifact> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(prefix);
        let file = match &self.dir {
            Some(dir) => builder.tempfile_in(std::path::absolute(dir)?)?,
            None => builder.tempfile()?,
        };
        Ok(RecordingArtifact::temporary(file.into_temp_path()))
    }
}

/// Always hands out the same caller-owned path.
#[derive(Debug, Clone)]
pub struct FixedArtifact {
    path: PathBuf,
}

impl FixedArtifact {
    /// Use `path` for every recording.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TempFileAllocator for FixedArtifact {
    fn allocate_weak(&self, _prefix: &str) -> io::Result<RecordingArtifact> {
        Ok(RecordingArtifact::at(std::path::absolute(&self.path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weak_temp_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = WeakTempFiles::in_dir(dir.path())
            .allocate_weak("perf-c2c-bin")
            .unwrap();

        let path = artifact.path().to_path_buf();
        assert!(artifact.is_temporary());
        assert!(path.is_absolute());
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("perf-c2c-bin"));

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = WeakTempFiles::in_dir(dir.path().join("missing"))
            .allocate_weak("perf-c2c-bin")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_fixed_artifact_kept_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c2c.data");
        std::fs::write(&path, b"recording").unwrap();

        let artifact = FixedArtifact::new(&path).allocate_weak("ignored").unwrap();
        assert_eq!(artifact.path(), path);
        assert!(!artifact.is_temporary());

        drop(artifact);
        assert!(path.exists());
    }
}
