//! Single-pass line counting for progress totals.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{IngestError, Result};

const READ_BUFFER_BYTES: usize = 1 << 20;

/// Count lines in the file at `path`.
///
/// Every `\n` ends a line, and trailing bytes after the last `\n` count as one
/// more line. Any read error aborts the count.
pub fn count_lines(path: &Path) -> Result<u64> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    count_lines_in(BufReader::with_capacity(READ_BUFFER_BYTES, file)).map_err(|source| {
        IngestError::LineCount {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Count lines from any buffered reader.
pub fn count_lines_in<R: BufRead>(mut reader: R) -> std::io::Result<u64> {
    let mut lines = 0u64;
    let mut last_byte = None;
    loop {
        let buf = match reader.fill_buf() {
            Ok([]) => break,
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        lines += buf.iter().filter(|&&b| b == b'\n').count() as u64;
        last_byte = buf.last().copied();
        let consumed = buf.len();
        reader.consume(consumed);
    }
    if matches!(last_byte, Some(b) if b != b'\n') {
        lines += 1;
    }
    Ok(lines)
}
