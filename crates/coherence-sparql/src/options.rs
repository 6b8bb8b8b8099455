use std::time::Duration;

use coherence_core::{Iri, Result};

/// Options that control how a dataset is profiled.
#[derive(Debug, Clone)]
pub struct ProfileOptions {
    /// Restrict every query to this named graph. `None` searches the whole dataset.
    pub partition: Option<Iri>,
    /// Deadline for each individual round-trip to the gateway.
    pub request_timeout: Duration,
}

impl ProfileOptions {
    /// Restrict profiling to a named graph, validating its label.
    pub fn with_partition(mut self, partition: &str) -> Result<Self> {
        self.partition = Some(Iri::parse(partition)?);
        Ok(self)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            partition: None,
            request_timeout: Duration::from_secs(60),
        }
    }
}
