use std::fs::{OpenOptions, create_dir_all};
use std::path::Path;

use crate::errors::EvalError;
use crate::structuredness::StructurednessReport;

/// Header line of the appended summary file.
pub const SUMMARY_HEADER: [&str; 2] = ["Total rdf:types", "Structuredness"];

/// Render a score the way it appears in summary files: always with a
/// fractional part, shortest round-trip digits otherwise.
pub fn format_score(value: f64) -> String {
    format!("{value:?}")
}

/// Data line matching [`SUMMARY_HEADER`].
pub fn summary_record(report: &StructurednessReport) -> [String; 2] {
    [
        report.type_count.to_string(),
        format_score(report.structuredness),
    ]
}

/// Append the header and data line to `path`, creating it if needed.
/// Existing content is never truncated.
pub fn append_summary(path: &Path, report: &StructurednessReport) -> Result<(), EvalError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    writer.write_record(SUMMARY_HEADER)?;
    writer.write_record(&summary_record(report))?;
    writer.flush()?;
    Ok(())
}
