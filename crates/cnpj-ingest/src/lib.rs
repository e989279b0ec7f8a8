//! Reading side of CNPJ table normalization.
//!
//! - **discovery**: input file listing and per-file work orders
//! - **chunk_size**: file size to rows-per-chunk step table
//! - **line_count**: single-pass line counting for progress totals
//! - **batch**: bounded-batch reader over a streaming CSV parser
//! - **dialect**: delimiter, quoting and encoding shared with the writer

pub mod batch;
pub mod chunk_size;
pub mod dialect;
pub mod discovery;
pub mod error;
pub mod line_count;

pub use batch::{BatchReader, Chunk, Row};
pub use chunk_size::{bytes_to_gib, chunk_size_for, chunk_size_for_bytes, file_size};
pub use dialect::{CsvDialect, TextEncoding, resolve_encoding};
pub use discovery::{describe_file, list_input_files};
pub use error::{IngestError, Result};
pub use line_count::{count_lines, count_lines_in};
