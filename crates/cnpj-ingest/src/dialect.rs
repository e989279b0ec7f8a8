//! CSV dialect shared by the reader and the writer.

use std::borrow::Cow;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use encoding_rs::{Encoding, mem};
use tracing::debug;

use cnpj_model::ProcessingConfig;

use crate::error::{IngestError, Result};

pub const DELIMITER: u8 = b';';
pub const QUOTE: u8 = b'"';

/// Labels read as strict ISO-8859-1, where every byte maps to the code point
/// of the same value. The WHATWG registry folds these into windows-1252.
const LATIN1_LABELS: &[&str] = &[
    "latin1",
    "latin-1",
    "l1",
    "iso-8859-1",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "csisolatin1",
    "cp819",
    "ibm819",
];

/// Byte encoding of the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// ISO-8859-1: bytes 0x80-0x9F are the C1 control characters.
    Latin1,
    /// Any other single-byte encoding from the WHATWG registry.
    SingleByte(&'static Encoding),
}

impl TextEncoding {
    pub fn name(self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::SingleByte(encoding) => encoding.name(),
        }
    }

    /// `None` when the bytes are not valid text.
    pub fn decode(self, bytes: &[u8]) -> Option<Cow<'_, str>> {
        match self {
            Self::Latin1 => Some(mem::decode_latin1(bytes)),
            Self::SingleByte(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
                if had_errors { None } else { Some(text) }
            }
        }
    }

    /// `None` when a character has no mapping.
    pub fn encode(self, text: &str) -> Option<Cow<'_, [u8]>> {
        match self {
            Self::Latin1 => mem::is_str_latin1(text).then(|| mem::encode_latin1_lossy(text)),
            Self::SingleByte(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                if had_errors { None } else { Some(bytes) }
            }
        }
    }
}

/// Field delimiter, quote character and byte encoding of the CNPJ files.
///
/// Files are headerless and every output field is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvDialect {
    pub delimiter: u8,
    pub quote: u8,
    pub encoding: TextEncoding,
}

impl Default for CsvDialect {
    /// `;`-delimited, `"`-quoted ISO-8859-1 text.
    fn default() -> Self {
        Self {
            delimiter: DELIMITER,
            quote: QUOTE,
            encoding: TextEncoding::Latin1,
        }
    }
}

impl CsvDialect {
    /// Default dialect with the encoding named by `label`.
    pub fn for_encoding_label(label: &str) -> Result<Self> {
        Ok(Self {
            encoding: resolve_encoding(label)?,
            ..Self::default()
        })
    }

    pub fn from_config(config: &ProcessingConfig) -> Result<Self> {
        Self::for_encoding_label(&config.encoding)
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .flexible(false);
        builder
    }

    pub fn writer_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'));
        builder
    }

    /// Decode one raw field. `None` when the bytes are not valid text.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        self.encoding.decode(bytes)
    }

    /// Encode one field. `None` when a character has no mapping.
    pub fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        self.encoding.encode(text)
    }
}

/// Look up a single-byte encoding by label.
///
/// ISO-8859-1 labels resolve to [`TextEncoding::Latin1`]; everything else goes
/// through the WHATWG registry and must be single-byte.
pub fn resolve_encoding(label: &str) -> Result<TextEncoding> {
    let label = label.trim();
    if LATIN1_LABELS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(label))
    {
        debug!(label, "encoding resolved to ISO-8859-1");
        return Ok(TextEncoding::Latin1);
    }
    let encoding =
        Encoding::for_label(label.as_bytes()).ok_or_else(|| IngestError::UnknownEncoding {
            label: label.to_string(),
        })?;
    if !encoding.is_single_byte() {
        return Err(IngestError::UnsupportedEncoding {
            encoding: encoding.name(),
        });
    }
    debug!(label, encoding = encoding.name(), "encoding resolved");
    Ok(TextEncoding::SingleByte(encoding))
}
