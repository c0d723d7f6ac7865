//! Bibliosynth
//!
//! Single command that runs every stage in sequence:
//! - Synthetic corpus generation
//! - Table persistence
//! - Metric computation
//! - Text/JSON reports and charts

use bibliosynth_cli::{run_pipeline, Args, PipelineError, Stage};
use bibliosynth_common::config::ObservabilityConfig;
use bibliosynth_common::logging;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

fn run(args: &Args) -> anyhow::Result<()> {
    let config = match args.load_config() {
        Ok(config) => config,
        Err(source) => {
            logging::init(&ObservabilityConfig::default());
            return Err(PipelineError {
                stage: Stage::Configuration,
                source,
            }
            .into());
        }
    };
    logging::init(&config.observability);

    info!("Starting Bibliosynth v{}", bibliosynth_common::VERSION);

    let outcome = run_pipeline(&config)?;

    println!("publications: {}", outcome.tables.publications.display());
    println!("researchers:  {}", outcome.tables.researchers.display());
    println!("sha256:       {}", outcome.tables.publications_sha256);
    println!("report:       {}", outcome.reports.report.display());
    println!("metrics:      {}", outcome.reports.metrics.display());
    for plot in &outcome.plots {
        println!("plot:         {}", plot.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<PipelineError>()
                .map(|p| {
                    error!(
                        stage = %p.stage,
                        code = p.source.code().as_code(),
                        error = %p.source,
                        "Pipeline failed"
                    );
                    p.exit_code()
                })
                .unwrap_or(1);
            eprintln!("error: {e}");
            ExitCode::from(code as u8)
        }
    }
}
