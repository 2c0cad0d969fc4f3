use serde::{Deserialize, Serialize};

/// Construction phase an edge type may appear in, per the topology registry's
/// edge-type table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseConstraint {
    Start,
    Any,
    End,
}

impl PhaseConstraint {
    /// Parse the lowercase wire id used by registry configuration
    /// (`"start"`, `"any"`, `"end"`). Returns `None` on any other string so
    /// the registry loader can collect it as a cross-reference violation
    /// rather than failing the whole parse.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "start" => Some(Self::Start),
            "any" => Some(Self::Any),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// The closed set of edge types a component boundary may carry.
///
/// `SELVEDGE` is the row-edge of a piece; every other variant carries a
/// stitch-count meaning. See [`crate::gauge`] and the join validator for how
/// the two units (stitches vs rows) get converted at a join boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeType {
    CastOn,
    LiveStitch,
    BoundOff,
    Selvedge,
    Open,
}

impl EdgeType {
    /// Parse the `SCREAMING_SNAKE_CASE` wire id used by registry
    /// configuration. Returns `None` on any unrecognized id so the registry
    /// loader can collect it as a cross-reference violation instead of
    /// failing the whole parse on the first bad row.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "CAST_ON" => Some(Self::CastOn),
            "LIVE_STITCH" => Some(Self::LiveStitch),
            "BOUND_OFF" => Some(Self::BoundOff),
            "SELVEDGE" => Some(Self::Selvedge),
            "OPEN" => Some(Self::Open),
            _ => None,
        }
    }

    /// The canonical wire id, inverse of [`Self::from_id`].
    pub fn id(&self) -> &'static str {
        match self {
            Self::CastOn => "CAST_ON",
            Self::LiveStitch => "LIVE_STITCH",
            Self::BoundOff => "BOUND_OFF",
            Self::Selvedge => "SELVEDGE",
            Self::Open => "OPEN",
        }
    }
}

/// A named boundary of a [`crate::ComponentSpec`].
///
/// `join_ref`, when present, names a [`crate::Join::id`] in the same
/// manifest; an edge with no `join_ref` is terminal for topology purposes
/// even if its `edge_type` is not itself terminal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub name: String,
    pub edge_type: EdgeType,
    pub join_ref: Option<String>,
    pub dimension_key: Option<String>,
}

impl Edge {
    pub fn new(name: impl Into<String>, edge_type: EdgeType) -> Self {
        Self {
            name: name.into(),
            edge_type,
            join_ref: None,
            dimension_key: None,
        }
    }

    pub fn with_join_ref(mut self, join_ref: impl Into<String>) -> Self {
        self.join_ref = Some(join_ref.into());
        self
    }

    pub fn with_dimension_key(mut self, dimension_key: impl Into<String>) -> Self {
        self.dimension_key = Some(dimension_key.into());
        self
    }
}
