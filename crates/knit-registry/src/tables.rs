use std::collections::BTreeMap;

use serde::Deserialize;

use knit_types::ParamValue;

/// One row of the wire-format `edge_types` table (§6 of the schema).
///
/// `phase_constraint` and the type ids are kept as plain strings here and
/// resolved against the closed enums during cross-reference validation,
/// not during deserialization — an unresolvable id is a *registry*
/// violation to be collected alongside every other one, not a parse error
/// that aborts the whole load on the first bad row.
#[derive(Clone, Debug, Deserialize)]
pub struct RawEdgeTypeEntry {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub has_live_stitches: bool,
    pub is_terminal: bool,
    pub phase_constraint: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawJoinTypeEntry {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub symmetric: bool,
    #[serde(default)]
    pub directional: bool,
    #[serde(default)]
    pub owns_parameters: Vec<String>,
    #[serde(default)]
    pub construction_methods: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawCompatibilityEntry {
    pub edge_type_a: String,
    pub edge_type_b: String,
    pub join_type: String,
    pub result: String,
    pub condition_fn: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawDefaultsEntry {
    pub edge_type_a: String,
    pub edge_type_b: String,
    pub join_type: String,
    #[serde(default)]
    pub defaults: BTreeMap<String, ParamValue>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawArithmeticEntry {
    pub join_type: String,
    pub implication: String,
}

/// The five tables exactly as read off the wire, before any cross-reference
/// validation has run. See [`crate::registry::TopologyRegistry::load`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawTables {
    #[serde(default)]
    pub edge_types: Vec<RawEdgeTypeEntry>,
    #[serde(default)]
    pub join_types: Vec<RawJoinTypeEntry>,
    #[serde(default)]
    pub compatibility: Vec<RawCompatibilityEntry>,
    #[serde(default)]
    pub defaults: Vec<RawDefaultsEntry>,
    #[serde(default)]
    pub arithmetic_implications: Vec<RawArithmeticEntry>,
}

/// Resolved compatibility result for one `(edge_a, edge_b, join_type)` key.
#[derive(Clone, Debug, PartialEq)]
pub enum CompatibilityResult {
    Valid,
    Invalid,
    Conditional { condition_fn: String },
}

/// Resolved edge-type table entry.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeTypeEntry {
    pub has_live_stitches: bool,
    pub is_terminal: bool,
    pub phase_constraint: knit_types::PhaseConstraint,
}

/// Resolved join-type table entry.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinTypeEntry {
    pub symmetric: bool,
    pub owned_params: Vec<String>,
    pub construction_methods: Vec<String>,
}
