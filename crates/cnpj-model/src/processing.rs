use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Bytes in one gibibyte.
pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Per-file work order built by the driver at dispatch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub size_bytes: u64,
    pub chunk_size: usize,
}

impl FileDescriptor {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        size_bytes: u64,
        chunk_size: usize,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            size_bytes,
            chunk_size,
        }
    }

    pub fn size_gib(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_GIB
    }

    /// Number of chunks needed for `total_lines` lines.
    pub fn total_chunks(&self, total_lines: u64) -> u64 {
        total_chunks(total_lines, self.chunk_size)
    }

    pub fn file_name(&self) -> String {
        display_name(&self.input_path)
    }
}

/// `ceil(total_lines / chunk_size)`, with a zero chunk size treated as one row.
pub fn total_chunks(total_lines: u64, chunk_size: usize) -> u64 {
    let chunk_size = chunk_size.max(1) as u64;
    total_lines.div_ceil(chunk_size)
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Counters collected while transforming one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    /// Lines reported by the line counter.
    pub total_lines: u64,
    /// Progress denominator derived from `total_lines`.
    pub total_chunks: u64,
    pub chunks_written: u64,
    pub rows_written: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FileStatus {
    Succeeded(TransformStats),
    Failed { message: String },
}

/// Result of processing one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub file_name: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn succeeded(descriptor: &FileDescriptor, stats: TransformStats) -> Self {
        Self::from_descriptor(descriptor, FileStatus::Succeeded(stats))
    }

    pub fn failed(descriptor: &FileDescriptor, message: impl Into<String>) -> Self {
        Self::from_descriptor(
            descriptor,
            FileStatus::Failed {
                message: message.into(),
            },
        )
    }

    fn from_descriptor(descriptor: &FileDescriptor, status: FileStatus) -> Self {
        Self {
            file_name: descriptor.file_name(),
            input_path: descriptor.input_path.clone(),
            output_path: descriptor.output_path.clone(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Succeeded(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FileStatus::Failed { message } => Some(message),
            FileStatus::Succeeded(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DirectoryStatus {
    /// Input subdirectory does not exist; skipped.
    Missing,
    /// Directory exists but could not be listed or its output dir created.
    Failed { message: String },
    Processed { files: Vec<FileOutcome> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryOutcome {
    pub name: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub status: DirectoryStatus,
}

impl DirectoryOutcome {
    pub fn files(&self) -> &[FileOutcome] {
        match &self.status {
            DirectoryStatus::Processed { files } => files,
            DirectoryStatus::Missing | DirectoryStatus::Failed { .. } => &[],
        }
    }
}

/// Aggregate of one driver run, in directory order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub directories: Vec<DirectoryOutcome>,
}

impl RunReport {
    pub fn files(&self) -> impl Iterator<Item = &FileOutcome> {
        self.directories.iter().flat_map(DirectoryOutcome::files)
    }

    pub fn succeeded_files(&self) -> usize {
        self.files().filter(|f| f.is_success()).count()
    }

    pub fn failed_files(&self) -> usize {
        self.files().filter(|f| !f.is_success()).count()
    }

    pub fn missing_directories(&self) -> usize {
        self.directories
            .iter()
            .filter(|d| matches!(d.status, DirectoryStatus::Missing))
            .count()
    }

    /// True when any file or directory failed. Missing directories do not count.
    pub fn has_errors(&self) -> bool {
        self.failed_files() > 0
            || self
                .directories
                .iter()
                .any(|d| matches!(d.status, DirectoryStatus::Failed { .. }))
    }
}
