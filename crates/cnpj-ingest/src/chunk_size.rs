//! Rows-per-chunk selection from file size.

use std::path::Path;

use cnpj_model::{BYTES_PER_GIB, ChunkSizeTable};

use crate::error::{IngestError, Result};

/// Convert a byte count to gibibytes.
pub fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GIB
}

/// Rows per chunk for a file of `size_gib` gibibytes.
///
/// The first step whose bound is strictly greater than `size_gib` wins; a
/// size equal to a bound falls into the next step.
pub fn chunk_size_for(size_gib: f64, table: &ChunkSizeTable) -> usize {
    table
        .steps
        .iter()
        .find(|step| size_gib < step.below_gib)
        .map_or(table.fallback_rows, |step| step.rows)
}

pub fn chunk_size_for_bytes(size_bytes: u64, table: &ChunkSizeTable) -> usize {
    chunk_size_for(bytes_to_gib(size_bytes), table)
}

/// Size of the file at `path` in bytes.
pub fn file_size(path: &Path) -> Result<u64> {
    std::fs::metadata(path)
        .map(|metadata| metadata.len())
        .map_err(|e| IngestError::open(path, e))
}
