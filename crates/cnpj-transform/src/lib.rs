//! CNPJ table transformation.
//!
//! - **normalization**: per-field text normalization
//! - **writer**: quote-all chunk writer in the table's byte encoding
//! - **stream**: chunked read-normalize-append pipeline for one file

pub mod error;
pub mod normalization;
pub mod stream;
pub mod writer;

pub use error::{Result, TransformError};
pub use normalization::{normalize_row, normalize_text, normalize_value};
pub use stream::{ChunkObserver, transform_file};
pub use writer::ChunkWriter;
