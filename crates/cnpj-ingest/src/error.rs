//! Error types for CNPJ table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating or reading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open, stat or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Line counting pass failed part way through.
    #[error("failed to count lines in {path}: {source}")]
    LineCount {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Malformed record, including a width different from the first record.
    #[error("failed to parse CSV {path} at line {line}: {message}")]
    CsvParse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Bytes that the configured encoding cannot decode.
    #[error("invalid {encoding} text in {path} at line {line}")]
    Decode {
        path: PathBuf,
        encoding: &'static str,
        line: u64,
    },

    // === Configuration Errors ===
    /// Encoding label not recognised.
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding { label: String },

    /// Only single-byte encodings are accepted.
    #[error("encoding '{encoding}' is not a single-byte encoding")]
    UnsupportedEncoding { encoding: &'static str },
}

impl IngestError {
    pub(crate) fn open(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
