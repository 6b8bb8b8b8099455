//! Core contracts and helpers for Coherence.
//!
//! This crate defines the per-type statistics model, label validation, and
//! utilities shared across the query gateway, the aggregator, and the CLI.

pub mod error;
pub mod iri;
pub mod model;
pub mod redaction;

pub use error::{Error, Result};
pub use iri::{Iri, RDF_TYPE};
pub use model::{DatasetProfile, TypeStats};
pub use redaction::{RedactedEndpoint, redact_endpoint};

/// Current contract version for `metrics.json` artifacts.
pub const REPORT_VERSION: &str = "0.1";
