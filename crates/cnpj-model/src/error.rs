use thiserror::Error;

/// Reasons a [`ProcessingConfig`](crate::ProcessingConfig) is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("at least one input directory must be configured")]
    NoDirectories,
    #[error("directory name must not be empty")]
    EmptyDirectoryName,
    #[error("output directory suffix must not be empty")]
    EmptyOutputSuffix,
    #[error("input extension must not be empty")]
    EmptyInputExtension,
    #[error("chunk size table bound {bound} GiB must be positive and greater than the previous bound")]
    UnorderedChunkStep { bound: f64 },
    #[error("chunk size for bound {bound} GiB must be at least one row")]
    ZeroChunkRows { bound: f64 },
    #[error("fallback chunk size must be at least one row")]
    ZeroFallbackRows,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
