//! Bibliosynth Report
//!
//! Pure consumer of computed metrics:
//! - `analysis_report.txt` human-readable summary
//! - `metrics.json` full snapshot
//! - PNG charts via plotters

pub mod charts;
pub mod summary;
pub mod text;

use bibliosynth_analytics::MetricsSnapshot;
use bibliosynth_common::artifact;
use bibliosynth_common::errors::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const REPORT_FILE: &str = "analysis_report.txt";
pub const METRICS_FILE: &str = "metrics.json";

/// Run parameters echoed into every report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInfo {
    pub seed: u64,
    pub current_year: i32,
    pub researcher_count: usize,
    pub publication_count: usize,

    /// Digest of the publication table the metrics were computed from
    pub table_sha256: Option<String>,
}

/// Paths of the written report files
#[derive(Debug, Clone)]
pub struct ReportFiles {
    pub report: PathBuf,
    pub metrics: PathBuf,
}

/// Write the text report and JSON summary into `dir`
pub fn write_reports(dir: &Path, snapshot: &MetricsSnapshot, run: &RunInfo) -> Result<ReportFiles> {
    let report = dir.join(REPORT_FILE);
    let metrics = dir.join(METRICS_FILE);

    artifact::write_atomic(&report, text::render(snapshot, run).as_bytes())?;
    artifact::write_atomic(&metrics, &summary::encode(snapshot, run)?)?;

    info!(
        report = %report.display(),
        metrics = %metrics.display(),
        "Reports written"
    );
    Ok(ReportFiles { report, metrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibliosynth_common::model::{Corpus, Researcher, ResearcherId};

    #[test]
    fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = Corpus::new(
            vec![Researcher {
                id: ResearcherId(1),
                name: "Ana Silva".into(),
                discipline: "Mathematics".into(),
                career_start: 1988,
            }],
            vec![],
        );
        let snapshot = MetricsSnapshot::compute(&corpus, 10).unwrap();
        let run = RunInfo {
            seed: 1,
            current_year: 2024,
            researcher_count: 1,
            publication_count: 0,
            table_sha256: Some("00ff".into()),
        };

        let files = write_reports(&dir.path().join("reports"), &snapshot, &run).unwrap();

        let text = std::fs::read_to_string(&files.report).unwrap();
        assert!(text.contains("publications_sha256: 00ff"));
        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&files.metrics).unwrap()).unwrap();
        assert_eq!(json["run"]["current_year"], 2024);
    }
}
