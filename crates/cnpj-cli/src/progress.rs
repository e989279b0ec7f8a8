//! Console status lines and the chunk progress bar.

use std::path::Path;
use std::time::Duration;

use indicatif::{HumanCount, ProgressBar, ProgressStyle};

use cnpj_model::{FileDescriptor, FileOutcome, FileStatus, RunReport, TransformStats};
use cnpj_transform::ChunkObserver;

use crate::pipeline::RunObserver;

const BAR_TEMPLATE: &str =
    "Processing chunks {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}<{eta_precise}]";

/// Prints human-readable progress to stdout and draws a chunk bar on stderr.
pub struct ConsoleReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ConsoleReporter {
    /// With `quiet`, only the per-file ✓/✗ lines are printed.
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    fn say(&self, line: &str) {
        if !self.quiet {
            println!("{line}");
        }
    }

    fn chunk_bar(total_chunks: u64) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        let pb = ProgressBar::new(total_chunks);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(200));
        pb
    }
}

impl ChunkObserver for ConsoleReporter {
    fn counting_lines(&mut self, _descriptor: &FileDescriptor) {
        self.say("Counting lines...");
    }

    fn started(&mut self, descriptor: &FileDescriptor, total_lines: u64, total_chunks: u64) {
        self.say(&format!("Total lines: {}", HumanCount(total_lines)));
        self.say(&format!(
            "Chunk size: {}",
            HumanCount(descriptor.chunk_size as u64)
        ));
        self.say(&format!("Total chunks: {}", HumanCount(total_chunks)));
        if !self.quiet {
            self.progress_bar = Some(Self::chunk_bar(total_chunks));
        }
    }

    fn chunk_written(&mut self, _chunk_index: usize, _rows: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
    }

    fn finished(&mut self, _stats: &TransformStats) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish();
        }
    }
}

impl RunObserver for ConsoleReporter {
    fn run_started(&mut self, directory_count: usize) {
        self.say(&format!("Processing {directory_count} directories"));
    }

    fn directory_started(&mut self, index: usize, total: usize, name: &str) {
        self.say(&format!("\n[{index}/{total}] Directory: {name}"));
    }

    fn directory_missing(&mut self, name: &str, path: &Path) {
        self.say(&format!(
            "Directory {name} not found ({}), skipping.",
            path.display()
        ));
    }

    fn directory_failed(&mut self, name: &str, message: &str) {
        println!("✗ Directory {name} failed: {message}");
    }

    fn files_found(&mut self, _name: &str, count: usize) {
        self.say(&format!("Found {count} CSV files to process"));
    }

    fn file_started(&mut self, index: usize, total: usize, descriptor: &FileDescriptor) {
        self.say(&format!(
            "\nFile {index}/{total}: {}",
            descriptor.file_name()
        ));
        self.say(&format!("File size: {:.2} GiB", descriptor.size_gib()));
    }

    fn file_finished(&mut self, outcome: &FileOutcome) {
        // A bar still present here belongs to a file that failed mid-way.
        if let Some(pb) = self.progress_bar.take() {
            pb.abandon();
        }
        match &outcome.status {
            FileStatus::Succeeded(_) => {
                println!("✓ {} processed successfully", outcome.file_name);
            }
            FileStatus::Failed { message } => {
                println!("✗ Failed to process {}: {message}", outcome.file_name);
            }
        }
    }

    fn run_finished(&mut self, _report: &RunReport) {
        self.say("\nAll directories processed.");
    }
}
