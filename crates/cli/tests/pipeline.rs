//! End-to-end pipeline runs against scratch directories

use bibliosynth_cli::{run_pipeline, Stage};
use bibliosynth_common::config::AppConfig;
use bibliosynth_common::errors::ErrorKind;
use bibliosynth_common::table;
use std::path::Path;

fn config_in(dir: &Path, seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.generator.researcher_count = 30;
    config.generator.publication_count = 150;
    config.generator.seed = seed;
    config.generator.current_year = 2024;
    config.output.dir = dir.to_path_buf();
    config.output.top_n = 5;
    config.output.render_plots = false;
    config
}

#[test]
fn test_pipeline_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = run_pipeline(&config_in(dir.path(), 42)).unwrap();

    assert!(outcome.tables.publications.exists());
    assert!(outcome.tables.researchers.exists());
    assert!(outcome.reports.report.exists());
    assert!(outcome.reports.metrics.exists());
    assert!(outcome.plots.is_empty());
    assert_eq!(outcome.run.researcher_count, 30);
    assert_eq!(outcome.run.publication_count, 150);

    let corpus = table::read_corpus(&dir.path().join("data")).unwrap();
    assert_eq!(corpus.publications.len(), 150);
    for p in &corpus.publications {
        assert!(!p.authors.is_empty());
        for a in &p.authors {
            assert!(corpus.researcher(*a).is_some());
        }
    }

    let report = std::fs::read_to_string(&outcome.reports.report).unwrap();
    assert!(report.contains(&format!(
        "publications_sha256: {}",
        outcome.tables.publications_sha256
    )));
    assert!(report.contains("seed: 42"));
    assert_eq!(report.matches("Researcher R").count(), 5);

    let metrics: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&outcome.reports.metrics).unwrap()).unwrap();
    assert_eq!(metrics["metrics"]["overall"]["total_publications"], 150);

    // No staging files left behind
    let leftovers: Vec<_> = walk(dir.path())
        .into_iter()
        .filter(|p| p.extension().is_some_and(|e| e == "tmp"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

#[test]
fn test_same_seed_same_tables() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let a = run_pipeline(&config_in(first.path(), 7)).unwrap();
    let b = run_pipeline(&config_in(second.path(), 7)).unwrap();

    assert_eq!(a.tables.publications_sha256, b.tables.publications_sha256);
    assert_eq!(
        std::fs::read(&a.tables.publications).unwrap(),
        std::fs::read(&b.tables.publications).unwrap()
    );
    assert_eq!(
        std::fs::read(&a.tables.researchers).unwrap(),
        std::fs::read(&b.tables.researchers).unwrap()
    );
    assert_eq!(
        std::fs::read(&a.reports.report).unwrap(),
        std::fs::read(&b.reports.report).unwrap()
    );
}

#[test]
fn test_different_seed_different_tables() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let a = run_pipeline(&config_in(first.path(), 1)).unwrap();
    let b = run_pipeline(&config_in(second.path(), 2)).unwrap();
    assert_ne!(a.tables.publications_sha256, b.tables.publications_sha256);
}

#[test]
fn test_invalid_parameters_fail_in_configuration_stage() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path(), 42);
    config.generator.researcher_count = 0;

    let err = run_pipeline(&config).unwrap_err();
    assert_eq!(err.stage, Stage::Configuration);
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_ne!(err.exit_code(), 0);

    // Nothing downstream ran
    assert!(!dir.path().join("data").exists());
}

#[test]
fn test_unwritable_output_fails_in_persistence_stage() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"occupied").unwrap();

    let err = run_pipeline(&config_in(&blocker, 42)).unwrap_err();
    assert_eq!(err.stage, Stage::Persistence);
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!blocker.join("reports").exists());
}

fn walk(dir: &Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(walk(&path));
        } else {
            out.push(path);
        }
    }
    out
}
