//! Quote-all, single-byte encoded chunk writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::Writer;

use cnpj_ingest::{Chunk, CsvDialect};

use crate::error::{Result, TransformError};

pub struct ChunkWriter<W: Write> {
    writer: Writer<W>,
    dialect: CsvDialect,
    path: PathBuf,
}

impl ChunkWriter<BufWriter<File>> {
    /// Create (or truncate) the output file at `path`.
    pub fn create(path: &Path, dialect: CsvDialect) -> Result<Self> {
        let file = File::create(path).map_err(|source| TransformError::CreateOutput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_writer(BufWriter::new(file), dialect).with_path(path))
    }
}

impl<W: Write> ChunkWriter<W> {
    pub fn from_writer(inner: W, dialect: CsvDialect) -> Self {
        Self {
            writer: dialect.writer_builder().from_writer(inner),
            dialect,
            path: PathBuf::from("<stream>"),
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Append every row of `chunk` and flush, so the chunk is on disk once
    /// this returns.
    pub fn write_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        for row in &chunk.rows {
            let fields = row
                .iter()
                .map(|value| {
                    self.dialect
                        .encode(value)
                        .ok_or(TransformError::Encode {
                            chunk: chunk.index,
                            encoding: self.dialect.encoding_name(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            self.writer
                .write_record(&fields)
                .map_err(|e| self.write_error(chunk.index, e.to_string()))?;
        }
        self.writer
            .flush()
            .map_err(|e| self.write_error(chunk.index, e.to_string()))
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        let path = self.path.clone();
        self.writer.into_inner().map_err(|e| TransformError::Write {
            path,
            chunk: 0,
            message: e.error().to_string(),
        })
    }

    fn write_error(&self, chunk: usize, message: String) -> TransformError {
        TransformError::Write {
            path: self.path.clone(),
            chunk,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(index: usize, rows: &[&[&str]]) -> Chunk {
        Chunk {
            index,
            rows: rows
                .iter()
                .map(|row| row.iter().map(|v| (*v).to_string()).collect())
                .collect(),
        }
    }

    fn written(chunks: &[Chunk]) -> String {
        let mut writer = ChunkWriter::from_writer(Vec::new(), CsvDialect::default());
        for c in chunks {
            writer.write_chunk(c).unwrap();
        }
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn quotes_every_field() {
        let out = written(&[chunk(0, &[&["JOSE", "SAO PAULO"], &["", "BR"]])]);
        assert_eq!(out, "\"JOSE\";\"SAO PAULO\"\n\"\";\"BR\"\n");
    }

    #[test]
    fn escapes_embedded_quotes() {
        let out = written(&[chunk(0, &[&["SAY \"HI\"", "A;B"]])]);
        assert_eq!(out, "\"SAY \"\"HI\"\"\";\"A;B\"\n");
    }

    #[test]
    fn appends_chunks_in_order() {
        let out = written(&[chunk(0, &[&["1"]]), chunk(1, &[&["2"], &["3"]])]);
        assert_eq!(out, "\"1\"\n\"2\"\n\"3\"\n");
    }

    #[test]
    fn unencodable_values_fail() {
        let mut writer = ChunkWriter::from_writer(Vec::new(), CsvDialect::default());
        let err = writer.write_chunk(&chunk(3, &[&["東京"]])).unwrap_err();
        assert!(matches!(err, TransformError::Encode { chunk: 3, .. }));
    }
}
