//! Pipeline orchestration
//!
//! Generator -> tables -> metrics -> reports -> charts, strictly in order.
//! Metrics are computed from the tables read back from disk, so the report
//! always describes exactly what was persisted.

use bibliosynth_analytics::MetricsSnapshot;
use bibliosynth_common::config::AppConfig;
use bibliosynth_common::table::{self, CorpusFiles};
use bibliosynth_report::{charts, write_reports, ReportFiles, RunInfo};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};

use crate::errors::{PipelineError, Stage, StageExt};

/// Everything a successful run produced
#[derive(Debug)]
pub struct PipelineOutcome {
    pub tables: CorpusFiles,
    pub reports: ReportFiles,
    pub plots: Vec<PathBuf>,
    pub run: RunInfo,
}

/// Run all stages; the first failure aborts the rest
#[instrument(skip_all, fields(seed = config.generator.seed))]
pub fn run_pipeline(config: &AppConfig) -> Result<PipelineOutcome, PipelineError> {
    let started = Instant::now();
    config.check().stage(Stage::Configuration)?;

    info!(
        researchers = config.generator.researcher_count,
        publications = config.generator.publication_count,
        current_year = config.generator.current_year,
        output = %config.output.dir.display(),
        "Starting pipeline"
    );

    let corpus = bibliosynth_generator::generate(&config.generator).stage(Stage::Generation)?;

    let data_dir = config.data_dir();
    let tables = table::write_corpus(&data_dir, &corpus).stage(Stage::Persistence)?;
    drop(corpus);

    let corpus = table::read_corpus(&data_dir).stage(Stage::Metrics)?;
    let snapshot = MetricsSnapshot::compute(&corpus, config.output.top_n).stage(Stage::Metrics)?;

    let run = RunInfo {
        seed: config.generator.seed,
        current_year: config.generator.current_year,
        researcher_count: corpus.researchers.len(),
        publication_count: corpus.publications.len(),
        table_sha256: Some(tables.publications_sha256.clone()),
    };
    let reports = write_reports(&config.reports_dir(), &snapshot, &run).stage(Stage::Report)?;

    let plots = if config.output.render_plots {
        charts::render_all(&config.plots_dir(), &corpus, &snapshot).stage(Stage::Plots)?
    } else {
        info!("Chart rendering disabled");
        Vec::new()
    };

    info!(
        sha256 = %tables.publications_sha256,
        charts = plots.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Pipeline finished"
    );

    Ok(PipelineOutcome {
        tables,
        reports,
        plots,
        run,
    })
}
