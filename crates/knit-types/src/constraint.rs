use serde::{Deserialize, Serialize};

use crate::gauge::Gauge;

/// A repeating stitch pattern. Opaque to the checker; carried through so
/// callers constructing a [`Constraint`] have one type to pass around
/// instead of splitting planner-only data across a side channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StitchMotif {
    pub name: String,
    pub stitch_repeat: i64,
    pub row_repeat: i64,
}

/// Yarn specification metadata. Opaque to the checker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YarnSpec {
    pub weight: String,
    pub fiber: String,
    pub needle_size_mm: f64,
}

/// Complete set of knitting constraints for a single component.
///
/// The checker reads only [`Constraint::gauge`] and
/// [`Constraint::physical_tolerance_mm`]; `stitch_motif`, `hard_constraints`,
/// and `yarn_spec` are opaque pass-through fields consumed by the stitch
/// filler stage upstream of this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub gauge: Gauge,
    pub stitch_motif: StitchMotif,
    pub hard_constraints: Vec<i64>,
    pub yarn_spec: YarnSpec,
    pub physical_tolerance_mm: f64,
}
