use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The closed set of join types connecting two component edges.
///
/// `SEAM` is the only symmetric member; every other variant is directional,
/// with `edge_a` upstream (constructed first) and `edge_b` downstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JoinType {
    Continuation,
    HeldStitch,
    CastOnJoin,
    Pickup,
    Seam,
}

impl JoinType {
    /// Parse the `SCREAMING_SNAKE_CASE` wire id used by registry
    /// configuration. Returns `None` on any unrecognized id so the registry
    /// loader can collect it as a cross-reference violation instead of
    /// failing the whole parse on the first bad row.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "CONTINUATION" => Some(Self::Continuation),
            "HELD_STITCH" => Some(Self::HeldStitch),
            "CAST_ON_JOIN" => Some(Self::CastOnJoin),
            "PICKUP" => Some(Self::Pickup),
            "SEAM" => Some(Self::Seam),
            _ => None,
        }
    }

    /// The canonical wire id, inverse of [`Self::from_id`].
    pub fn id(&self) -> &'static str {
        match self {
            Self::Continuation => "CONTINUATION",
            Self::HeldStitch => "HELD_STITCH",
            Self::CastOnJoin => "CAST_ON_JOIN",
            Self::Pickup => "PICKUP",
            Self::Seam => "SEAM",
        }
    }

    /// All five closed-set members, in declaration order. Used by the
    /// registry loader to check "every JoinType must have exactly one
    /// arithmetic entry" without hand-maintaining a second list.
    pub const ALL: [Self; 5] = [
        Self::Continuation,
        Self::HeldStitch,
        Self::CastOnJoin,
        Self::Pickup,
        Self::Seam,
    ];
}

/// A parameter value recognized by one of the join-type parameter schemas
/// in the spec (`cast_on_count`, `pickup_ratio`, `cast_on_method`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl ParamValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// An immutable key/value map of join parameters. Keyed on a `BTreeMap` so
/// iteration (and therefore any derived hash or debug output) is
/// deterministic across runs.
pub type Parameters = BTreeMap<String, ParamValue>;

/// A declared connection between two edges, usually on different
/// components.
///
/// `edge_a_ref`/`edge_b_ref` are `"component_name.edge_name"` strings; the
/// ordering is load-bearing (non-commutative) except for `SEAM`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub id: String,
    pub join_type: JoinType,
    pub edge_a_ref: String,
    pub edge_b_ref: String,
    pub parameters: Parameters,
}

impl Join {
    pub fn new(
        id: impl Into<String>,
        join_type: JoinType,
        edge_a_ref: impl Into<String>,
        edge_b_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            join_type,
            edge_a_ref: edge_a_ref.into(),
            edge_b_ref: edge_b_ref.into(),
            parameters: Parameters::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    /// Component name half of a `"component.edge"` reference string.
    pub fn component_of(edge_ref: &str) -> &str {
        edge_ref.split('.').next().unwrap_or(edge_ref)
    }
}
