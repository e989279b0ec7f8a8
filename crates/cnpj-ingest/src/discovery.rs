//! Input file discovery and per-file work orders.

use std::path::{Path, PathBuf};

use cnpj_model::{FileDescriptor, ProcessingConfig};
use tracing::{debug, trace};

use crate::chunk_size::{chunk_size_for_bytes, file_size};
use crate::error::{IngestError, Result};

/// Lists the input files of `dir` matching the configured extension.
///
/// Returns files sorted by filename.
pub fn list_input_files(dir: &Path, config: &ProcessingConfig) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        if config.is_input_file(&path) {
            files.push(path);
        } else {
            trace!(path = %path.display(), "skipping non-input file");
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    debug!(dir = %dir.display(), count = files.len(), "input files listed");

    Ok(files)
}

/// Build the work order for one input file of `directory`.
pub fn describe_file(
    input_path: &Path,
    directory: &str,
    config: &ProcessingConfig,
) -> Result<FileDescriptor> {
    let size_bytes = file_size(input_path)?;
    let name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output_path = config
        .output_dir(directory)
        .join(config.output_file_name(&name));
    let chunk_size = chunk_size_for_bytes(size_bytes, &config.chunk_sizes);
    debug!(file = %name, size_bytes, chunk_size, "chunk size selected");
    Ok(FileDescriptor::new(
        input_path,
        output_path,
        size_bytes,
        chunk_size,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["b.csv", "a.CSV", "notes.txt", "c.csv.gz"] {
            std::fs::write(dir.path().join(name), "x;y\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();
        dir
    }

    #[test]
    fn test_list_input_files() {
        let dir = create_test_dir();
        let files = list_input_files(dir.path(), &ProcessingConfig::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["b.csv"]);
    }

    #[test]
    fn test_list_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = list_input_files(&dir.path().join("Socios"), &ProcessingConfig::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_describe_file() {
        let dir = create_test_dir();
        let config = ProcessingConfig::new(dir.path());
        let input = dir.path().join("b.csv");
        let descriptor = describe_file(&input, "Paises", &config).unwrap();
        assert_eq!(descriptor.input_path, input);
        assert_eq!(
            descriptor.output_path,
            dir.path().join("Paises_Processados").join("processed_b.csv")
        );
        assert_eq!(descriptor.size_bytes, 4);
        assert_eq!(descriptor.chunk_size, 25_000);
    }
}
