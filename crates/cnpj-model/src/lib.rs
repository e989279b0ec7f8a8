pub mod config;
pub mod error;
pub mod processing;

pub use config::{ChunkSizeTable, ChunkStep, ProcessingConfig};
pub use error::{ConfigError, Result};
pub use processing::{
    BYTES_PER_GIB, DirectoryOutcome, DirectoryStatus, FileDescriptor, FileOutcome, FileStatus,
    RunReport, TransformStats, total_chunks,
};

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn descriptor(name: &str) -> FileDescriptor {
        FileDescriptor::new(
            PathBuf::from("in").join(name),
            PathBuf::from("out").join(format!("processed_{name}")),
            1024,
            2,
        )
    }

    #[test]
    fn total_chunks_rounds_up() {
        assert_eq!(total_chunks(0, 2), 0);
        assert_eq!(total_chunks(3, 2), 2);
        assert_eq!(total_chunks(4, 2), 2);
        assert_eq!(total_chunks(5, 0), 5);
        assert_eq!(descriptor("a.csv").total_chunks(1), 1);
    }

    #[test]
    fn size_gib_uses_binary_units() {
        let d = FileDescriptor::new("a.csv", "b.csv", 1024 * 1024 * 1024 / 4, 1);
        assert!((d.size_gib() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn run_report_counts() {
        let ok = FileOutcome::succeeded(&descriptor("a.csv"), TransformStats::default());
        let bad = FileOutcome::failed(&descriptor("b.csv"), "boom");
        assert_eq!(ok.file_name, "a.csv");
        assert_eq!(bad.error_message(), Some("boom"));

        let report = RunReport {
            directories: vec![
                DirectoryOutcome {
                    name: "Cnaes".to_string(),
                    input_dir: "Cnaes".into(),
                    output_dir: "Cnaes_Processados".into(),
                    status: DirectoryStatus::Processed {
                        files: vec![ok, bad],
                    },
                },
                DirectoryOutcome {
                    name: "Paises".to_string(),
                    input_dir: "Paises".into(),
                    output_dir: "Paises_Processados".into(),
                    status: DirectoryStatus::Missing,
                },
            ],
        };
        assert_eq!(report.succeeded_files(), 1);
        assert_eq!(report.failed_files(), 1);
        assert_eq!(report.missing_directories(), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn report_serializes() {
        let report = RunReport {
            directories: vec![DirectoryOutcome {
                name: "Motivos".to_string(),
                input_dir: "Motivos".into(),
                output_dir: "Motivos_Processados".into(),
                status: DirectoryStatus::Missing,
            }],
        };
        let json = serde_json::to_string(&report).expect("serialize report");
        let round: RunReport = serde_json::from_str(&json).expect("deserialize report");
        assert_eq!(round, report);
        assert!(!round.has_errors());
    }
}
