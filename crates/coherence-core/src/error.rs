use std::time::Duration;

use thiserror::Error;

/// Core error type shared across Coherence crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The query endpoint could not be reached or answered with a non-success status.
    #[error("gateway error: {0}")]
    Gateway(String),
    /// The endpoint answered, but the body is not a usable result set.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// A single round-trip exceeded its deadline.
    #[error("query timed out after {0:?}")]
    Timeout(Duration),
    /// The endpoint location is not a usable URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// A type, predicate or partition label cannot be placed in a query.
    #[error("invalid label: {0}")]
    InvalidLabel(String),
}

/// Convenience alias for results returned by Coherence crates.
pub type Result<T> = std::result::Result<T, Error>;
