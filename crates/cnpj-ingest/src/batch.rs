//! Bounded-batch reading over a streaming CSV parser.
//!
//! [`BatchReader`] pulls at most `chunk_size` records per call from an open
//! `csv::Reader`, decoding each field with the dialect's encoding. Batches come
//! out strictly in file order and the reader never looks ahead of the batch it
//! is filling, so peak memory is bounded by one chunk.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ByteRecord, Reader};

use crate::dialect::CsvDialect;
use crate::error::{IngestError, Result};

/// One record; every value is text and empty fields stay empty.
pub type Row = Vec<String>;

/// A bounded run of consecutive rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Zero-based position of this chunk in the file.
    pub index: usize,
    pub rows: Vec<Row>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct BatchReader<R: Read> {
    reader: Reader<R>,
    dialect: CsvDialect,
    chunk_size: usize,
    /// Used only in error messages.
    path: PathBuf,
    record: ByteRecord,
    next_index: usize,
    exhausted: bool,
}

impl BatchReader<BufReader<File>> {
    /// Open `path` for batched reading.
    pub fn open(path: &Path, dialect: CsvDialect, chunk_size: usize) -> Result<Self> {
        let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
        Ok(Self::from_reader(BufReader::new(file), dialect, chunk_size).with_path(path))
    }
}

impl<R: Read> BatchReader<R> {
    /// Wrap any reader. A `chunk_size` of zero is treated as one.
    pub fn from_reader(reader: R, dialect: CsvDialect, chunk_size: usize) -> Self {
        Self {
            reader: dialect.reader_builder().from_reader(reader),
            dialect,
            chunk_size: chunk_size.max(1),
            path: PathBuf::from("<stream>"),
            record: ByteRecord::new(),
            next_index: 0,
            exhausted: false,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read the next batch, or `None` once the input is exhausted.
    pub fn next_batch(&mut self) -> Result<Option<Chunk>> {
        if self.exhausted {
            return Ok(None);
        }
        let mut rows = Vec::with_capacity(self.chunk_size.min(4096));
        while rows.len() < self.chunk_size {
            let has_record = self
                .reader
                .read_byte_record(&mut self.record)
                .map_err(|e| self.parse_error(&e))?;
            if !has_record {
                self.exhausted = true;
                break;
            }
            rows.push(self.decode_record()?);
        }
        if rows.is_empty() {
            return Ok(None);
        }
        let chunk = Chunk {
            index: self.next_index,
            rows,
        };
        self.next_index += 1;
        Ok(Some(chunk))
    }

    fn decode_record(&self) -> Result<Row> {
        self.record
            .iter()
            .map(|field| {
                self.dialect
                    .decode(field)
                    .map(std::borrow::Cow::into_owned)
                    .ok_or_else(|| IngestError::Decode {
                        path: self.path.clone(),
                        encoding: self.dialect.encoding_name(),
                        line: self.current_line(),
                    })
            })
            .collect()
    }

    fn current_line(&self) -> u64 {
        self.record.position().map_or(0, csv::Position::line)
    }

    fn parse_error(&self, error: &csv::Error) -> IngestError {
        let line = error
            .position()
            .map_or_else(|| self.reader.position().line(), csv::Position::line);
        IngestError::CsvParse {
            path: self.path.clone(),
            line,
            message: error.to_string(),
        }
    }
}

impl<R: Read> Iterator for BatchReader<R> {
    type Item = Result<Chunk>;

    /// Stops after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_batch() {
            Ok(chunk) => chunk.map(Ok),
            Err(error) => {
                self.exhausted = true;
                Some(Err(error))
            }
        }
    }
}
