//! Structuredness (coherence) scoring for RDF datasets.

pub mod engine;
pub mod errors;
pub mod report;
pub mod structuredness;
pub mod summary;

pub use engine::{
    EvaluationResult, PerformanceMetrics, StructurednessEngine, compute_structuredness,
};
pub use errors::EvalError;
pub use report::render_report;
pub use structuredness::{
    StructurednessReport, TypeContribution, aggregate_structuredness, type_coverage,
    weight_denominator,
};
pub use summary::{SUMMARY_HEADER, append_summary, format_score, summary_record};
