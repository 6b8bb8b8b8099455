use thiserror::Error;

/// Errors emitted while computing or persisting structuredness.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] coherence_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
