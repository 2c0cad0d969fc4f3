use thiserror::Error;

/// Construction-time validation failure for a Data Model type.
///
/// Distinct from [`crate::CheckerError`]-style checker output: these fire
/// when a value cannot be built at all, before any simulation or join
/// validation has a chance to run.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DomainError {
    #[error("component {component:?} has duplicate edge name {name:?}")]
    DuplicateEdgeName { component: String, name: String },

    #[error("component {component:?} must have instantiation_count >= 1, got {count}")]
    NonPositiveInstantiationCount { component: String, count: i64 },

    #[error("component name must not be empty")]
    EmptyComponentName,

    #[error("{field} must be non-negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },

    #[error("gauge {field} must be strictly positive, got {value}")]
    NonPositiveGaugeDensity { field: &'static str, value: f64 },

    #[error("join {join_id:?} references unknown edge {edge_ref:?}")]
    UnresolvedEdgeRef { join_id: String, edge_ref: String },
}
