use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Statistics gathered once per type and reused by every aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeStats {
    /// Type label (a class IRI).
    pub type_label: String,
    /// Distinct instances asserted to be of this type.
    pub instance_count: u64,
    /// Distinct content predicates used by instances of this type.
    pub predicates: BTreeSet<String>,
    /// Distinct instances carrying each predicate. Keys mirror `predicates`.
    pub occurrences: BTreeMap<String, u64>,
}

impl TypeStats {
    pub fn new(type_label: impl Into<String>, instance_count: u64) -> Self {
        Self {
            type_label: type_label.into(),
            instance_count,
            predicates: BTreeSet::new(),
            occurrences: BTreeMap::new(),
        }
    }

    /// Record a predicate together with its occurrence count.
    pub fn with_predicate(mut self, predicate: impl Into<String>, occurrences: u64) -> Self {
        let predicate = predicate.into();
        self.predicates.insert(predicate.clone());
        self.occurrences.insert(predicate, occurrences);
        self
    }

    pub fn predicate_count(&self) -> u64 {
        self.predicates.len() as u64
    }

    /// Sum of occurrence counts over the predicates of this type.
    pub fn occurrence_sum(&self) -> u64 {
        self.predicates
            .iter()
            .map(|predicate| self.occurrences.get(predicate).copied().unwrap_or(0))
            .sum()
    }

    /// Instances plus distinct predicates: the type's footprint in the dataset.
    pub fn mass(&self) -> u64 {
        self.instance_count + self.predicate_count()
    }
}

/// Per-type statistics for a whole dataset or a single named graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatasetProfile {
    /// Named graph the profile was restricted to, if any.
    pub partition: Option<String>,
    pub types: Vec<TypeStats>,
    /// Type values that could not be queried (blank nodes, literals).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_types: Vec<String>,
}

impl DatasetProfile {
    pub fn new(partition: Option<String>, types: Vec<TypeStats>) -> Self {
        Self {
            partition,
            types,
            skipped_types: Vec::new(),
        }
    }

    /// Distinct `rdf:type` values seen, including the ones that were skipped.
    pub fn type_count(&self) -> usize {
        self.types.len() + self.skipped_types.len()
    }
}
