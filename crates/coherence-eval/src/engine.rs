use std::time::Instant;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use coherence_core::DatasetProfile;
use coherence_sparql::{ProfileOptions, QueryGateway, profile_dataset};

use crate::errors::EvalError;
use crate::structuredness::{StructurednessReport, aggregate_structuredness};

/// Wall-clock timings for one evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceMetrics {
    pub profile_ms: u128,
    pub aggregate_ms: u128,
    pub total_ms: u128,
}

/// Result of a structuredness evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub profile: DatasetProfile,
    pub report: StructurednessReport,
    pub performance: PerformanceMetrics,
}

/// Profiles a dataset through a gateway and scores it.
#[derive(Debug, Clone, Default)]
pub struct StructurednessEngine {
    options: ProfileOptions,
}

impl StructurednessEngine {
    pub fn new(options: ProfileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    /// Gather per-type statistics once, then fold them into the score.
    /// Any retrieval failure aborts the run without a partial score.
    pub async fn run<G>(&self, gateway: &G) -> Result<EvaluationResult, EvalError>
    where
        G: QueryGateway + ?Sized,
    {
        let total_start = Instant::now();

        let profile = profile_dataset(gateway, &self.options).await?;
        let profile_ms = total_start.elapsed().as_millis();

        let aggregate_start = Instant::now();
        let report = aggregate_structuredness(&profile);
        let aggregate_ms = aggregate_start.elapsed().as_millis();

        tracing::info!(
            event = "structuredness_computed",
            types = report.type_count,
            weight_denominator = report.weight_denominator,
            structuredness = report.structuredness
        );

        Ok(EvaluationResult {
            profile,
            report,
            performance: PerformanceMetrics {
                profile_ms,
                aggregate_ms,
                total_ms: total_start.elapsed().as_millis(),
            },
        })
    }
}

/// Structuredness of the dataset behind `gateway`, optionally restricted to
/// the partition configured in `options`.
pub async fn compute_structuredness<G>(
    gateway: &G,
    options: ProfileOptions,
) -> Result<f64, EvalError>
where
    G: QueryGateway + ?Sized,
{
    let result = StructurednessEngine::new(options).run(gateway).await?;
    Ok(result.report.structuredness)
}
