//! Directory/batch driver.
//!
//! Walks the configured subdirectories in order and transforms every input
//! file found in them, one file at a time. Each file ends up as a
//! [`FileOutcome`]; a failing file never stops the files or directories after
//! it. Missing subdirectories are skipped with a notice.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{error, info, info_span, warn};

use cnpj_ingest::{CsvDialect, describe_file, list_input_files};
use cnpj_model::{
    DirectoryOutcome, DirectoryStatus, FileDescriptor, FileOutcome, FileStatus, ProcessingConfig,
    RunReport,
};
use cnpj_transform::{ChunkObserver, transform_file};

/// Driver-level events on top of per-chunk progress.
pub trait RunObserver: ChunkObserver {
    fn run_started(&mut self, _directory_count: usize) {}

    /// `index` is one-based.
    fn directory_started(&mut self, _index: usize, _total: usize, _name: &str) {}

    fn directory_missing(&mut self, _name: &str, _path: &Path) {}

    fn directory_failed(&mut self, _name: &str, _message: &str) {}

    fn files_found(&mut self, _name: &str, _count: usize) {}

    /// `index` is one-based.
    fn file_started(&mut self, _index: usize, _total: usize, _descriptor: &FileDescriptor) {}

    fn file_finished(&mut self, _outcome: &FileOutcome) {}

    fn run_finished(&mut self, _report: &RunReport) {}
}

impl RunObserver for () {}

/// Process every configured directory under `config.base_dir`.
///
/// Fails only when the configuration itself is unusable; per-file and
/// per-directory problems are recorded in the returned report.
pub fn run<O: RunObserver>(config: &ProcessingConfig, observer: &mut O) -> Result<RunReport> {
    config.validate().context("invalid configuration")?;
    let dialect = CsvDialect::from_config(config).context("invalid configuration")?;

    let run_span = info_span!("run", base_dir = %config.base_dir.display());
    let _run_guard = run_span.enter();
    let started = Instant::now();

    let total = config.directories.len();
    observer.run_started(total);

    let mut report = RunReport::default();
    for (idx, name) in config.directories.iter().enumerate() {
        observer.directory_started(idx + 1, total, name);
        let outcome = process_directory(config, dialect, name, observer);
        report.directories.push(outcome);
    }

    info!(
        directories = total,
        succeeded = report.succeeded_files(),
        failed = report.failed_files(),
        missing = report.missing_directories(),
        duration_ms = started.elapsed().as_millis(),
        "run complete"
    );
    observer.run_finished(&report);
    Ok(report)
}

/// Transform every input file of one subdirectory.
pub fn process_directory<O: RunObserver>(
    config: &ProcessingConfig,
    dialect: CsvDialect,
    name: &str,
    observer: &mut O,
) -> DirectoryOutcome {
    let span = info_span!("directory", name = %name);
    let _guard = span.enter();

    let input_dir = config.input_dir(name);
    let output_dir = config.output_dir(name);
    let outcome = |status| DirectoryOutcome {
        name: name.to_string(),
        input_dir: input_dir.clone(),
        output_dir: output_dir.clone(),
        status,
    };

    if !input_dir.is_dir() {
        warn!(path = %input_dir.display(), "input directory not found, skipping");
        observer.directory_missing(name, &input_dir);
        return outcome(DirectoryStatus::Missing);
    }

    let prepared = std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))
        .and_then(|()| list_input_files(&input_dir, config).context("list input files"));
    let files = match prepared {
        Ok(files) => files,
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "directory failed");
            observer.directory_failed(name, &message);
            return outcome(DirectoryStatus::Failed { message });
        }
    };

    info!(file_count = files.len(), "input files found");
    observer.files_found(name, files.len());

    let total = files.len();
    let mut outcomes = Vec::with_capacity(total);
    for (idx, path) in files.iter().enumerate() {
        let file_outcome = match describe_file(path, name, config) {
            Ok(descriptor) => {
                observer.file_started(idx + 1, total, &descriptor);
                process_file(&descriptor, dialect, observer)
            }
            Err(err) => undescribed_failure(config, name, path, &err.to_string()),
        };
        observer.file_finished(&file_outcome);
        outcomes.push(file_outcome);
    }

    outcome(DirectoryStatus::Processed { files: outcomes })
}

/// Transform one file, turning any error into a failed outcome.
pub fn process_file<O: ChunkObserver + ?Sized>(
    descriptor: &FileDescriptor,
    dialect: CsvDialect,
    observer: &mut O,
) -> FileOutcome {
    let span = info_span!(
        "file",
        file = %descriptor.file_name(),
        size_bytes = descriptor.size_bytes,
        chunk_size = descriptor.chunk_size
    );
    let _guard = span.enter();
    let started = Instant::now();

    match transform_file(descriptor, dialect, observer) {
        Ok(stats) => {
            info!(
                rows = stats.rows_written,
                chunks = stats.chunks_written,
                duration_ms = started.elapsed().as_millis(),
                "file processed"
            );
            FileOutcome::succeeded(descriptor, stats)
        }
        Err(err) => {
            error!(error = %err, output = %descriptor.output_path.display(), "file failed");
            FileOutcome::failed(descriptor, err.to_string())
        }
    }
}

/// Outcome for a file whose size could not even be read.
fn undescribed_failure(
    config: &ProcessingConfig,
    directory: &str,
    path: &Path,
    message: &str,
) -> FileOutcome {
    error!(error = %message, path = %path.display(), "file failed");
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileOutcome {
        output_path: config
            .output_dir(directory)
            .join(config.output_file_name(&file_name)),
        file_name,
        input_path: path.to_path_buf(),
        status: FileStatus::Failed {
            message: message.to_string(),
        },
    }
}
