//! Chunked streaming rewrite of one CNPJ table.
//!
//! [`transform_file`] runs the whole per-file pipeline:
//!
//! 1. count input lines to derive the progress total
//! 2. delete any output left by a previous run, then create the output fresh
//! 3. read up to `chunk_size` rows, normalize every field, append and flush
//! 4. repeat until the input is exhausted
//!
//! The first error aborts the file. Chunks written before the error stay on
//! disk.

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info};

use cnpj_ingest::{BatchReader, CsvDialect, count_lines};
use cnpj_model::{FileDescriptor, TransformStats};

use crate::error::{Result, TransformError};
use crate::normalization::normalize_row;
use crate::writer::ChunkWriter;

/// Receives chunk progress for one file.
///
/// `chunk_written` is called exactly once per chunk that reached the output,
/// in order. All methods default to doing nothing.
pub trait ChunkObserver {
    /// About to count the lines of `descriptor.input_path`.
    fn counting_lines(&mut self, _descriptor: &FileDescriptor) {}

    /// Line count finished; `total_chunks` is the progress denominator.
    fn started(&mut self, _descriptor: &FileDescriptor, _total_lines: u64, _total_chunks: u64) {}

    fn chunk_written(&mut self, _chunk_index: usize, _rows: usize) {}

    /// Called after the last chunk, on success only.
    fn finished(&mut self, _stats: &TransformStats) {}
}

/// Observer that ignores every event.
impl ChunkObserver for () {}

/// Normalize `descriptor.input_path` into `descriptor.output_path`.
pub fn transform_file<O: ChunkObserver + ?Sized>(
    descriptor: &FileDescriptor,
    dialect: CsvDialect,
    observer: &mut O,
) -> Result<TransformStats> {
    let input = descriptor.input_path.as_path();
    let output = descriptor.output_path.as_path();

    observer.counting_lines(descriptor);
    let total_lines = count_lines(input)?;
    let total_chunks = descriptor.total_chunks(total_lines);
    info!(
        input = %input.display(),
        total_lines,
        chunk_size = descriptor.chunk_size,
        total_chunks,
        "line count complete"
    );
    observer.started(descriptor, total_lines, total_chunks);

    remove_stale_output(output)?;

    let mut stats = TransformStats {
        total_lines,
        total_chunks,
        ..TransformStats::default()
    };
    let mut reader = BatchReader::open(input, dialect, descriptor.chunk_size)?;
    let mut writer = ChunkWriter::create(output, dialect)?;

    while let Some(mut chunk) = reader.next_batch()? {
        for row in &mut chunk.rows {
            normalize_row(row);
        }
        writer.write_chunk(&chunk)?;

        stats.chunks_written += 1;
        stats.rows_written += chunk.len() as u64;
        debug!(
            chunk = chunk.index,
            rows = chunk.len(),
            written = stats.chunks_written,
            total_chunks,
            "chunk written"
        );
        observer.chunk_written(chunk.index, chunk.len());
    }

    writer.into_inner()?;
    observer.finished(&stats);
    Ok(stats)
}

fn remove_stale_output(output: &Path) -> Result<()> {
    match std::fs::remove_file(output) {
        Ok(()) => {
            debug!(output = %output.display(), "removed existing output");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(TransformError::RemoveOutput {
            path: output.to_path_buf(),
            source,
        }),
    }
}
