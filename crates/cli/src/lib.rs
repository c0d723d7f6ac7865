//! Bibliosynth CLI
//!
//! Argument parsing and the stage-by-stage pipeline behind the
//! `bibliosynth` binary.

pub mod args;
pub mod errors;
pub mod pipeline;

pub use args::Args;
pub use errors::{PipelineError, Stage};
pub use pipeline::{run_pipeline, PipelineOutcome};
