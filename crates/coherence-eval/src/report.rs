use crate::structuredness::StructurednessReport;
use crate::summary::format_score;

const LOW_STRUCTUREDNESS: f64 = 0.5;
const HIGH_STRUCTUREDNESS: f64 = 0.9;

/// Render a deterministic markdown report from a structuredness result.
pub fn render_report(report: &StructurednessReport, endpoint: &str) -> String {
    let mut lines = Vec::new();

    lines.push("# Coherence Structuredness Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- endpoint: {endpoint}"));
    lines.push(format!(
        "- named_graph: {}",
        report.partition.as_deref().unwrap_or("-")
    ));
    lines.push(format!("- report_version: {}", report.report_version));
    lines.push(format!("- total_types: {}", report.type_count));
    lines.push(format!("- weight_denominator: {}", report.weight_denominator));
    lines.push(format!(
        "- structuredness: {}",
        format_score(report.structuredness)
    ));
    lines.push(String::new());

    if !report.types.is_empty() {
        lines.push("## Per-type coverage".to_string());
        lines.push(
            "| type | instances | predicates | occurrences | coverage | weight | contribution |"
                .to_string(),
        );
        lines.push("| --- | --- | --- | --- | --- | --- | --- |".to_string());
        for item in &report.types {
            lines.push(format!(
                "| {} | {} | {} | {} | {:.4} | {:.4} | {:.4} |",
                item.type_label,
                item.instance_count,
                item.predicate_count,
                item.occurrence_sum,
                item.coverage,
                item.weight,
                item.contribution
            ));
        }
        lines.push(String::new());
    }

    if !report.skipped_types.is_empty() {
        lines.push("## Skipped types".to_string());
        for value in &report.skipped_types {
            lines.push(format!("- {value}: not an IRI, excluded from the score"));
        }
        lines.push(String::new());
    }

    lines.push("## Interpretation".to_string());
    lines.extend(interpretation(report));
    lines.join("\n")
}

fn interpretation(report: &StructurednessReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.types.is_empty() {
        lines.push("- no queryable rdf:type values found; nothing to measure.".to_string());
        return lines;
    }
    if report.structuredness > 1.0 {
        lines.push(
            "- score exceeds 1.0: occurrence counts are larger than instance counts, \
             check the endpoint data."
                .to_string(),
        );
    } else if report.structuredness >= HIGH_STRUCTUREDNESS {
        lines.push(
            "- highly structured: instances fill the same predicate slots, \
             typical of generated benchmark data."
                .to_string(),
        );
    } else if report.structuredness < LOW_STRUCTUREDNESS {
        lines.push(
            "- loosely structured: instances of the same type use heterogeneous predicates, \
             typical of real-world data."
                .to_string(),
        );
    } else {
        lines.push("- moderately structured dataset.".to_string());
    }

    let empty_types = report
        .types
        .iter()
        .filter(|item| item.predicate_count == 0)
        .count();
    if empty_types > 0 {
        lines.push(format!(
            "- {empty_types} type(s) have no content predicates and contribute nothing."
        ));
    }
    lines
}
