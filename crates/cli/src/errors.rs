//! Pipeline error types

use bibliosynth_common::errors::{AppError, ErrorKind};
use std::fmt;
use thiserror::Error;

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Generation,
    Persistence,
    Metrics,
    Report,
    Plots,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Configuration => "configuration",
            Stage::Generation => "generation",
            Stage::Persistence => "persistence",
            Stage::Metrics => "metrics",
            Stage::Report => "report",
            Stage::Plots => "plots",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure, tagged with the stage that produced it
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: AppError,
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    pub fn exit_code(&self) -> i32 {
        self.source.exit_code()
    }
}

/// Attach a stage to a fallible step
pub trait StageExt<T> {
    fn stage(self, stage: Stage) -> Result<T, PipelineError>;
}

impl<T> StageExt<T> for Result<T, AppError> {
    fn stage(self, stage: Stage) -> Result<T, PipelineError> {
        self.map_err(|source| PipelineError { stage, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_display() {
        let err: Result<(), _> = Err(AppError::integrity("publication P00001 has no authors"));
        let err = err.stage(Stage::Metrics).unwrap_err();

        assert_eq!(err.stage, Stage::Metrics);
        assert_eq!(err.kind(), ErrorKind::DataIntegrity);
        assert!(err.to_string().starts_with("metrics stage failed:"));
        assert_eq!(err.exit_code(), 3);
    }
}
