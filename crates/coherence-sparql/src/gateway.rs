use async_trait::async_trait;

use coherence_core::Result;

use crate::results::ResultSet;

/// Trait implemented by anything that can answer a SPARQL `SELECT` query.
#[async_trait]
pub trait QueryGateway: Send + Sync {
    /// Returns the gateway identifier (e.g. `http`).
    fn engine(&self) -> &'static str;

    /// Run a query and return its tabular result.
    async fn execute(&self, query: &str) -> Result<ResultSet>;
}
