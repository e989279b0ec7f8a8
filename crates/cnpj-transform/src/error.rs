//! Error types for the streaming transform.

use std::path::PathBuf;
use thiserror::Error;

use cnpj_ingest::IngestError;

/// Everything that can abort the transform of one file.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Line counting, opening or parsing the input failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A stale output file could not be removed.
    #[error("failed to remove existing output {path}: {source}")]
    RemoveOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created.
    #[error("failed to create output {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A normalized value has no representation in the output encoding.
    #[error("value in chunk {chunk} cannot be encoded as {encoding}")]
    Encode { chunk: usize, encoding: &'static str },

    /// Writing or flushing a chunk failed.
    #[error("failed to write chunk {chunk} to {path}: {message}")]
    Write {
        path: PathBuf,
        chunk: usize,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_errors_pass_through() {
        let err: TransformError = IngestError::FileNotFound {
            path: PathBuf::from("Cnaes/x.csv"),
        }
        .into();
        assert_eq!(err.to_string(), "CSV file not found: Cnaes/x.csv");
    }
}
