//! SPARQL retrieval for structuredness profiling.

pub mod gateway;
pub mod http;
pub mod options;
pub mod profiler;
pub mod queries;
pub mod results;

pub use gateway::QueryGateway;
pub use http::{HttpGateway, HttpGatewayOptions};
pub use options::ProfileOptions;
pub use profiler::{
    TypeListing, instance_count_of, list_types, occurrences_of, predicates_of, profile_dataset,
    profile_type,
};
pub use results::{ResultSet, Row, Term};

pub use coherence_core::{DatasetProfile, TypeStats};
