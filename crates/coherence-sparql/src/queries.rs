//! Builders for the four query shapes used during profiling.
//!
//! Every label passes through [`Iri`] before it reaches the query text.

use coherence_core::{Iri, RDF_TYPE};

pub const TYPE_VAR: &str = "type";
pub const PREDICATE_VAR: &str = "typePred";
pub const INSTANCE_COUNT_VAR: &str = "cnt";
pub const OCCURRENCE_VAR: &str = "occurrences";

/// Distinct values bound to the type-membership relation.
pub fn list_types(partition: Option<&Iri>) -> String {
    format!(
        "SELECT DISTINCT ?{TYPE_VAR}{from} WHERE {{ ?s <{RDF_TYPE}> ?{TYPE_VAR} }}",
        from = from_clause(partition),
    )
}

/// Distinct predicates used by at least one instance of `type_iri`.
pub fn predicates_of(type_iri: &Iri, partition: Option<&Iri>) -> String {
    format!(
        "SELECT DISTINCT ?{PREDICATE_VAR}{from} WHERE {{ ?s <{RDF_TYPE}> {ty} . ?s ?{PREDICATE_VAR} ?o }}",
        from = from_clause(partition),
        ty = type_iri.to_sparql(),
    )
}

/// Number of distinct instances of `type_iri`.
pub fn instance_count_of(type_iri: &Iri, partition: Option<&Iri>) -> String {
    format!(
        "SELECT (COUNT(DISTINCT ?s) AS ?{INSTANCE_COUNT_VAR}){from} WHERE {{ ?s <{RDF_TYPE}> {ty} }}",
        from = from_clause(partition),
        ty = type_iri.to_sparql(),
    )
}

/// Number of distinct instances of `type_iri` with at least one value for `predicate`.
pub fn occurrences_of(predicate: &Iri, type_iri: &Iri, partition: Option<&Iri>) -> String {
    format!(
        "SELECT (COUNT(DISTINCT ?s) AS ?{OCCURRENCE_VAR}){from} WHERE {{ ?s <{RDF_TYPE}> {ty} . ?s {pred} ?o }}",
        from = from_clause(partition),
        ty = type_iri.to_sparql(),
        pred = predicate.to_sparql(),
    )
}

fn from_clause(partition: Option<&Iri>) -> String {
    partition
        .map(|graph| format!(" FROM {}", graph.to_sparql()))
        .unwrap_or_default()
}
