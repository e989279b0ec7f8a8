//! Processing configuration.
//!
//! Every knob the batch driver needs lives in [`ProcessingConfig`]. The
//! defaults reproduce the fixed layout of the CNPJ open-data dump, so an empty
//! JSON object (`{}`) deserializes into a working configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Reference tables shipped in the CNPJ dump, one subdirectory each.
pub const DEFAULT_DIRECTORIES: [&str; 10] = [
    "Cnaes",
    "Empresas",
    "Estabelecimentos",
    "Motivos",
    "Municipios",
    "Naturezas",
    "Paises",
    "Qualificacoes",
    "Simples",
    "Socios",
];

pub const DEFAULT_BASE_DIR: &str = "cnpjs";
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_Processados";
pub const DEFAULT_OUTPUT_PREFIX: &str = "processed_";
pub const DEFAULT_ENCODING: &str = "latin1";
pub const DEFAULT_INPUT_EXTENSION: &str = "csv";

/// Rows per chunk used once a file reaches the last step bound.
pub const DEFAULT_FALLBACK_ROWS: usize = 400_000;

/// One entry of the chunk-size step table.
///
/// Files strictly smaller than `below_gib` use `rows` rows per chunk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkStep {
    pub below_gib: f64,
    pub rows: usize,
}

impl ChunkStep {
    pub const fn new(below_gib: f64, rows: usize) -> Self {
        Self { below_gib, rows }
    }
}

/// Monotonic mapping from file size to rows per chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSizeTable {
    /// Steps ordered by strictly increasing `below_gib`.
    pub steps: Vec<ChunkStep>,
    /// Rows per chunk for files at or above the last bound.
    pub fallback_rows: usize,
}

impl Default for ChunkSizeTable {
    fn default() -> Self {
        Self {
            steps: vec![
                ChunkStep::new(0.25, 25_000),
                ChunkStep::new(0.5, 50_000),
                ChunkStep::new(1.0, 100_000),
                ChunkStep::new(1.5, 150_000),
                ChunkStep::new(2.0, 200_000),
                ChunkStep::new(2.5, 250_000),
                ChunkStep::new(3.0, 300_000),
                ChunkStep::new(3.5, 350_000),
            ],
            fallback_rows: DEFAULT_FALLBACK_ROWS,
        }
    }
}

impl ChunkSizeTable {
    /// Check ordering and row counts.
    pub fn validate(&self) -> Result<()> {
        let mut previous = 0.0_f64;
        for step in &self.steps {
            if step.below_gib.is_nan() || step.below_gib <= previous {
                return Err(ConfigError::UnorderedChunkStep {
                    bound: step.below_gib,
                });
            }
            if step.rows == 0 {
                return Err(ConfigError::ZeroChunkRows {
                    bound: step.below_gib,
                });
            }
            previous = step.below_gib;
        }
        if self.fallback_rows == 0 {
            return Err(ConfigError::ZeroFallbackRows);
        }
        Ok(())
    }
}

/// Configuration for a normalization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Directory holding the reference-table subdirectories.
    pub base_dir: PathBuf,
    /// Subdirectory names processed in order.
    pub directories: Vec<String>,
    /// Appended to a subdirectory name to form its output directory.
    pub output_suffix: String,
    /// Prepended to each input file name to form the output file name.
    pub output_prefix: String,
    /// Encoding label for reading and writing (must be single-byte).
    pub encoding: String,
    /// File extension (without dot, case-insensitive) selecting input files.
    pub input_extension: String,
    pub chunk_sizes: ChunkSizeTable,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            directories: DEFAULT_DIRECTORIES.iter().map(|d| (*d).to_string()).collect(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            encoding: DEFAULT_ENCODING.to_string(),
            input_extension: DEFAULT_INPUT_EXTENSION.to_string(),
            chunk_sizes: ChunkSizeTable::default(),
        }
    }
}

impl ProcessingConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    #[must_use]
    pub fn with_directories<I, S>(mut self, directories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directories = directories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_chunk_sizes(mut self, chunk_sizes: ChunkSizeTable) -> Self {
        self.chunk_sizes = chunk_sizes;
        self
    }

    /// Validate everything that does not need the encoding registry.
    ///
    /// The encoding label is resolved by `cnpj-ingest`, which owns the codec.
    pub fn validate(&self) -> Result<()> {
        if self.directories.is_empty() {
            return Err(ConfigError::NoDirectories);
        }
        if self.directories.iter().any(|d| d.trim().is_empty()) {
            return Err(ConfigError::EmptyDirectoryName);
        }
        if self.output_suffix.is_empty() {
            return Err(ConfigError::EmptyOutputSuffix);
        }
        if self.input_extension.trim_start_matches('.').is_empty() {
            return Err(ConfigError::EmptyInputExtension);
        }
        self.chunk_sizes.validate()
    }

    pub fn input_dir(&self, directory: &str) -> PathBuf {
        self.base_dir.join(directory)
    }

    /// Sibling output directory, e.g. `Empresas` -> `Empresas_Processados`.
    pub fn output_dir(&self, directory: &str) -> PathBuf {
        self.base_dir
            .join(format!("{directory}{}", self.output_suffix))
    }

    pub fn output_file_name(&self, input_name: &str) -> String {
        format!("{}{input_name}", self.output_prefix)
    }

    /// Whether `path` carries the configured input extension. The match is
    /// case-sensitive, so `a.CSV` is not an input file.
    pub fn is_input_file(&self, path: &Path) -> bool {
        let wanted = self.input_extension.trim_start_matches('.');
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == wanted)
    }
}
