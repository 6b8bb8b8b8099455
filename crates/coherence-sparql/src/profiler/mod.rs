//! Schema discovery, type profiling and predicate occurrence counting.
//!
//! Every call is one blocking round-trip to the gateway, bounded by
//! [`ProfileOptions::request_timeout`]. Any failure aborts the whole profile.

use std::collections::BTreeSet;

use coherence_core::{DatasetProfile, Error, Iri, Result, TypeStats};

use crate::gateway::QueryGateway;
use crate::options::ProfileOptions;
use crate::queries;
use crate::results::ResultSet;

mod mapper;

/// Outcome of schema discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeListing {
    pub types: BTreeSet<Iri>,
    /// Type values that cannot be addressed in follow-up queries.
    pub skipped: Vec<String>,
}

/// Every distinct type in the dataset (or the configured partition).
pub async fn list_types<G>(gateway: &G, opts: &ProfileOptions) -> Result<TypeListing>
where
    G: QueryGateway + ?Sized,
{
    let query = queries::list_types(opts.partition.as_ref());
    let results = execute(gateway, &query, opts).await?;
    let (types, skipped) = mapper::map_types(&results, queries::TYPE_VAR)?;
    Ok(TypeListing { types, skipped })
}

/// Distinct content predicates used by instances of `type_iri`.
pub async fn predicates_of<G>(
    gateway: &G,
    type_iri: &Iri,
    opts: &ProfileOptions,
) -> Result<BTreeSet<Iri>>
where
    G: QueryGateway + ?Sized,
{
    let query = queries::predicates_of(type_iri, opts.partition.as_ref());
    let results = execute(gateway, &query, opts).await?;
    mapper::map_predicates(&results, queries::PREDICATE_VAR)
}

/// Distinct instances asserted to be of `type_iri`.
pub async fn instance_count_of<G>(gateway: &G, type_iri: &Iri, opts: &ProfileOptions) -> Result<u64>
where
    G: QueryGateway + ?Sized,
{
    let query = queries::instance_count_of(type_iri, opts.partition.as_ref());
    let results = execute(gateway, &query, opts).await?;
    mapper::map_count(&results, queries::INSTANCE_COUNT_VAR)
}

/// Distinct instances of `type_iri` that have at least one value for `predicate`.
pub async fn occurrences_of<G>(
    gateway: &G,
    predicate: &Iri,
    type_iri: &Iri,
    opts: &ProfileOptions,
) -> Result<u64>
where
    G: QueryGateway + ?Sized,
{
    let query = queries::occurrences_of(predicate, type_iri, opts.partition.as_ref());
    let results = execute(gateway, &query, opts).await?;
    mapper::map_count(&results, queries::OCCURRENCE_VAR)
}

/// Collect the statistics record for a single type.
pub async fn profile_type<G>(
    gateway: &G,
    type_iri: &Iri,
    opts: &ProfileOptions,
) -> Result<TypeStats>
where
    G: QueryGateway + ?Sized,
{
    let predicates = predicates_of(gateway, type_iri, opts).await?;
    let instance_count = instance_count_of(gateway, type_iri, opts).await?;

    let mut stats = TypeStats::new(type_iri.as_str(), instance_count);
    for predicate in &predicates {
        let occurrences = occurrences_of(gateway, predicate, type_iri, opts).await?;
        stats = stats.with_predicate(predicate.as_str(), occurrences);
    }
    Ok(stats)
}

/// Profile every type once so the aggregator can fold over a local cache.
pub async fn profile_dataset<G>(gateway: &G, opts: &ProfileOptions) -> Result<DatasetProfile>
where
    G: QueryGateway + ?Sized,
{
    let listing = list_types(gateway, opts).await?;
    let total = listing.types.len();
    tracing::info!(
        event = "types_discovered",
        engine = gateway.engine(),
        types = total,
        skipped = listing.skipped.len()
    );
    for value in &listing.skipped {
        tracing::warn!(event = "type_skipped", value = %value, reason = "not an IRI");
    }

    let mut types = Vec::with_capacity(total);
    for (index, type_iri) in listing.types.iter().enumerate() {
        let stats = profile_type(gateway, type_iri, opts).await?;
        tracing::info!(
            event = "type_profiled",
            index = index + 1,
            total = total,
            type_label = %type_iri,
            instances = stats.instance_count,
            predicates = stats.predicate_count(),
            occurrence_sum = stats.occurrence_sum()
        );
        types.push(stats);
    }

    Ok(DatasetProfile {
        partition: opts.partition.as_ref().map(|graph| graph.to_string()),
        types,
        skipped_types: listing.skipped,
    })
}

async fn execute<G>(gateway: &G, query: &str, opts: &ProfileOptions) -> Result<ResultSet>
where
    G: QueryGateway + ?Sized,
{
    match tokio::time::timeout(opts.request_timeout, gateway.execute(query)).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(opts.request_timeout)),
    }
}
