mod logging;
mod run;

pub use logging::init_logging;
pub use run::{
    MetricsArtifact, RunContext, RunOptions, RunPaths, append_output, start_run, write_metrics,
    write_report,
};

use std::path::PathBuf;

use coherence_eval::EvalError;
use thiserror::Error;

/// Errors raised while persisting a run: the run directory, its logs, and
/// the user-requested summary file.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
    /// The summary file could not be appended. The score was already reported.
    #[error("failed to append summary to {path}: {source}")]
    Output { path: PathBuf, source: EvalError },
}

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
