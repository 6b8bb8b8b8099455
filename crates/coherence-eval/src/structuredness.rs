//! Weighted coverage aggregation (Duan et al., "Apples and Oranges").
//!
//! Each type contributes `coverage * weight`, where coverage is the fraction
//! of (predicate x instance) cells actually populated and weight is the
//! type's share of `instances + predicates` over the whole dataset.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use coherence_core::{DatasetProfile, REPORT_VERSION, TypeStats};

/// Machine-readable structuredness result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StructurednessReport {
    pub report_version: String,
    pub partition: Option<String>,
    /// Distinct `rdf:type` values discovered, skipped ones included.
    pub type_count: usize,
    /// Sum over all types of `instance_count + predicate_count`.
    pub weight_denominator: u64,
    pub structuredness: f64,
    /// Per-type breakdown, sorted by type label.
    pub types: Vec<TypeContribution>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_types: Vec<String>,
}

/// One type's share of the final score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypeContribution {
    pub type_label: String,
    pub instance_count: u64,
    pub predicate_count: u64,
    pub occurrence_sum: u64,
    pub coverage: f64,
    pub weight: f64,
    pub contribution: f64,
}

/// Fraction of populated (predicate x instance) cells for one type.
///
/// A type without content predicates uses a denominator of 1, so its
/// coverage is 0. A type that reports predicates but no instances has no
/// cells at all and is also scored 0.
pub fn type_coverage(stats: &TypeStats) -> f64 {
    let predicates = stats.predicate_count();
    let denom = if predicates == 0 {
        1
    } else {
        predicates.saturating_mul(stats.instance_count)
    };
    if denom == 0 {
        return 0.0;
    }
    stats.occurrence_sum() as f64 / denom as f64
}

/// Global weight denominator: total dataset mass.
pub fn weight_denominator(types: &[TypeStats]) -> u64 {
    types.iter().map(TypeStats::mass).sum()
}

/// Fold a cached profile into the structuredness score.
///
/// Types are visited in label order so that repeated runs over the same
/// data sum in the same order and give bit-identical scores.
pub fn aggregate_structuredness(profile: &DatasetProfile) -> StructurednessReport {
    let denominator = weight_denominator(&profile.types);

    let mut ordered: Vec<&TypeStats> = profile.types.iter().collect();
    ordered.sort_by(|left, right| left.type_label.cmp(&right.type_label));

    let mut structuredness = 0.0;
    let mut types = Vec::with_capacity(ordered.len());
    for stats in ordered {
        let coverage = type_coverage(stats);
        let weight = if denominator == 0 {
            0.0
        } else {
            stats.mass() as f64 / denominator as f64
        };
        let contribution = coverage * weight;
        structuredness += contribution;

        types.push(TypeContribution {
            type_label: stats.type_label.clone(),
            instance_count: stats.instance_count,
            predicate_count: stats.predicate_count(),
            occurrence_sum: stats.occurrence_sum(),
            coverage,
            weight,
            contribution,
        });
    }

    StructurednessReport {
        report_version: REPORT_VERSION.to_string(),
        partition: profile.partition.clone(),
        type_count: profile.type_count(),
        weight_denominator: denominator,
        structuredness,
        types,
        skipped_types: profile.skipped_types.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn profile(types: Vec<TypeStats>) -> DatasetProfile {
        DatasetProfile::new(None, types)
    }

    #[test]
    fn empty_dataset_scores_exactly_zero() {
        let report = aggregate_structuredness(&profile(Vec::new()));
        assert_eq!(report.structuredness, 0.0);
        assert_eq!(report.weight_denominator, 0);
        assert_eq!(report.type_count, 0);
        assert!(report.types.is_empty());
    }

    #[test]
    fn fully_populated_single_type_scores_one() {
        let stats = TypeStats::new("http://ex.org/A", 7)
            .with_predicate("http://ex.org/p1", 7)
            .with_predicate("http://ex.org/p2", 7)
            .with_predicate("http://ex.org/p3", 7);
        let report = aggregate_structuredness(&profile(vec![stats]));

        assert_eq!(report.types[0].coverage, 1.0);
        assert_eq!(report.types[0].weight, 1.0);
        assert_eq!(report.structuredness, 1.0);
    }

    #[test]
    fn type_without_predicates_scores_zero() {
        for instances in [0, 1, 500] {
            let stats = TypeStats::new("http://ex.org/A", instances);
            let report = aggregate_structuredness(&profile(vec![stats]));
            assert_eq!(report.structuredness, 0.0, "instances = {instances}");
        }
    }

    #[test]
    fn two_types_are_weighted_by_mass() {
        let a = TypeStats::new("http://ex.org/A", 10)
            .with_predicate("http://ex.org/p1", 10)
            .with_predicate("http://ex.org/p2", 5);
        let b = TypeStats::new("http://ex.org/B", 5).with_predicate("http://ex.org/p1", 5);

        let report = aggregate_structuredness(&profile(vec![b, a]));

        assert_eq!(report.weight_denominator, 18);
        assert_eq!(report.types[0].type_label, "http://ex.org/A");
        assert!((report.types[0].coverage - 0.75).abs() < EPSILON);
        assert!((report.types[0].weight - 12.0 / 18.0).abs() < EPSILON);
        assert!((report.types[1].coverage - 1.0).abs() < EPSILON);
        assert!((report.types[1].weight - 6.0 / 18.0).abs() < EPSILON);
        assert!((report.structuredness - 15.0 / 18.0).abs() < EPSILON);
        assert!((report.structuredness - 0.8333).abs() < 1e-3);
    }

    #[test]
    fn coverage_uses_true_division() {
        let stats = TypeStats::new("http://ex.org/A", 3).with_predicate("http://ex.org/p", 1);
        assert!((type_coverage(&stats) - 1.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn predicates_without_instances_do_not_divide_by_zero() {
        let stats = TypeStats::new("http://ex.org/A", 0).with_predicate("http://ex.org/p", 0);
        assert_eq!(type_coverage(&stats), 0.0);
        let report = aggregate_structuredness(&profile(vec![stats]));
        assert_eq!(report.structuredness, 0.0);
        assert!(report.structuredness.is_finite());
    }

    #[test]
    fn consistent_counts_stay_within_unit_interval() {
        let mut types = Vec::new();
        for index in 0..25u64 {
            let instances = 1 + index * 3;
            let mut stats = TypeStats::new(format!("http://ex.org/T{index}"), instances);
            for predicate in 0..(index % 6) {
                stats = stats.with_predicate(
                    format!("http://ex.org/p{predicate}"),
                    (instances * (predicate + 1)) / 6,
                );
            }
            types.push(stats);
        }

        let report = aggregate_structuredness(&profile(types));
        assert!(report.structuredness >= 0.0);
        assert!(report.structuredness <= 1.0);
        for contribution in &report.types {
            assert!((0.0..=1.0).contains(&contribution.coverage));
        }
        let weights: f64 = report.types.iter().map(|t| t.weight).sum();
        assert!((weights - 1.0).abs() < 1e-9);
    }

    #[test]
    fn inconsistent_counts_can_exceed_one() {
        let stats = TypeStats::new("http://ex.org/A", 2).with_predicate("http://ex.org/p", 9);
        let report = aggregate_structuredness(&profile(vec![stats]));
        assert!(report.structuredness > 1.0);
    }

    #[test]
    fn aggregation_is_order_independent_and_repeatable() {
        let a = TypeStats::new("http://ex.org/A", 4).with_predicate("http://ex.org/p", 3);
        let b = TypeStats::new("http://ex.org/B", 9)
            .with_predicate("http://ex.org/p", 2)
            .with_predicate("http://ex.org/q", 9);
        let c = TypeStats::new("http://ex.org/C", 1);

        let forward = aggregate_structuredness(&profile(vec![a.clone(), b.clone(), c.clone()]));
        let backward = aggregate_structuredness(&profile(vec![c, b, a]));
        assert_eq!(forward.structuredness, backward.structuredness);
        assert_eq!(forward, backward);
    }
}
