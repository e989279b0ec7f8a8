//! End-to-end tests for the chunked streaming transform.

use std::fs;
use std::path::Path;

use cnpj_ingest::{BatchReader, Chunk, CsvDialect, IngestError};
use cnpj_model::FileDescriptor;
use cnpj_transform::{ChunkObserver, TransformError, normalize_text, transform_file};
use tempfile::TempDir;

struct Progress {
    total: u64,
    completed: Vec<u64>,
}

impl ChunkObserver for Progress {
    fn started(&mut self, _descriptor: &FileDescriptor, _lines: u64, total_chunks: u64) {
        self.total = total_chunks;
    }

    fn chunk_written(&mut self, _chunk_index: usize, _rows: usize) {
        let next = self.completed.last().copied().unwrap_or(0) + 1;
        self.completed.push(next);
    }
}

fn setup(input: &[u8], chunk_size: usize) -> (TempDir, FileDescriptor) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("ESTABELE.csv");
    fs::write(&input_path, input).unwrap();
    let descriptor = FileDescriptor::new(
        input_path,
        dir.path().join("processed_ESTABELE.csv"),
        input.len() as u64,
        chunk_size,
    );
    (dir, descriptor)
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    BatchReader::open(path, CsvDialect::default(), 1_000)
        .unwrap()
        .collect::<Result<Vec<Chunk>, _>>()
        .unwrap()
        .into_iter()
        .flat_map(|chunk| chunk.rows)
        .collect()
}

#[test]
fn normalizes_three_rows_in_two_chunks() {
    // josé;são paulo / "  ana  ";rio / "";br in Latin-1.
    let input = b"\"jos\xe9\";\"s\xe3o paulo\"\n\"  ana  \";\"rio\"\n\"\";\"br\"\n";
    let (_dir, descriptor) = setup(input, 2);
    let mut progress = Progress {
        total: 0,
        completed: Vec::new(),
    };

    let stats = transform_file(&descriptor, CsvDialect::default(), &mut progress).unwrap();

    assert_eq!(stats.total_chunks, 2);
    assert_eq!(stats.chunks_written, 2);
    assert_eq!(stats.rows_written, 3);
    assert_eq!(progress.total, 2);
    assert_eq!(progress.completed, vec![1, 2]);

    let content = fs::read_to_string(&descriptor.output_path).unwrap();
    insta::assert_snapshot!(content.trim_end(), @r#"
    "JOSE";"SAO PAULO"
    "ANA";"RIO"
    "";"BR"
    "#);
}

#[test]
fn preserves_row_and_column_order() {
    let mut input = String::new();
    for i in 0..57 {
        input.push_str(&format!("{i};  col b {i} ;;last {i}\n"));
    }
    let (_dir, descriptor) = setup(input.as_bytes(), 10);

    let stats = transform_file(&descriptor, CsvDialect::default(), &mut ()).unwrap();
    assert_eq!(stats.total_chunks, 6);
    assert_eq!(stats.rows_written, 57);

    let source = read_rows(&descriptor.input_path);
    let output = read_rows(&descriptor.output_path);
    assert_eq!(output.len(), source.len());
    for (i, (src, out)) in source.iter().zip(&output).enumerate() {
        assert_eq!(out.len(), 4, "row {i}");
        let expected: Vec<String> = src.iter().map(|v| normalize_text(v)).collect();
        assert_eq!(out, &expected, "row {i}");
    }
    assert_eq!(output[56], vec!["56", "COL B 56", "", "LAST 56"]);
}

#[test]
fn output_is_latin1_compatible_ascii() {
    let input = b"\"Ant\xf4nio Jo\xe3o\";\"Cora\xe7\xe3o de Jesus\"\n";
    let (_dir, descriptor) = setup(input, 5);
    transform_file(&descriptor, CsvDialect::default(), &mut ()).unwrap();

    let bytes = fs::read(&descriptor.output_path).unwrap();
    assert!(bytes.is_ascii());
    assert_eq!(bytes, b"\"ANTONIO JOAO\";\"CORACAO DE JESUS\"\n");
}

#[test]
fn mid_file_failure_keeps_written_chunks() {
    // Third row has one field instead of two.
    let input = b"a;b\nc;d\ne\nf;g\n";
    let (_dir, descriptor) = setup(input, 2);
    let mut progress = Progress {
        total: 0,
        completed: Vec::new(),
    };

    let err = transform_file(&descriptor, CsvDialect::default(), &mut progress).unwrap_err();

    assert!(matches!(
        err,
        TransformError::Ingest(IngestError::CsvParse { line: 3, .. })
    ));
    assert_eq!(progress.completed, vec![1]);
    assert_eq!(
        fs::read_to_string(&descriptor.output_path).unwrap(),
        "\"A\";\"B\"\n\"C\";\"D\"\n"
    );
}

#[test]
fn c1_control_bytes_are_dropped_not_transliterated() {
    // 0x80, 0x93, 0x94 and 0x99 are C1 controls in ISO-8859-1, not €, “, ” or ™.
    let input = b"\"a\x80b\";\"\x93x\x94\x99\"\n";
    let (_dir, descriptor) = setup(input, 5);

    transform_file(&descriptor, CsvDialect::default(), &mut ()).unwrap();

    assert_eq!(
        fs::read_to_string(&descriptor.output_path).unwrap(),
        "\"AB\";\"X\"\n"
    );
}

#[test]
fn unwritable_output_aborts_the_file() {
    let (dir, mut descriptor) = setup(b"a;b\n", 5);
    descriptor.output_path = dir.path().join("no_such_dir").join("processed_ESTABELE.csv");
    let mut progress = Progress {
        total: 0,
        completed: Vec::new(),
    };

    let err = transform_file(&descriptor, CsvDialect::default(), &mut progress).unwrap_err();

    assert!(matches!(err, TransformError::CreateOutput { .. }), "{err:?}");
    assert!(err.to_string().contains("no_such_dir"));
    assert!(progress.completed.is_empty());
    assert!(!descriptor.output_path.exists());
}
