use thiserror::Error;

/// One failure found during the topology registry's cross-reference pass.
///
/// Grouped informally as RR-1..RR-4 (registry rule), mirroring the four
/// bullet points the cross-reference check runs: unknown type references,
/// terminal edge types leaking into the compatibility table, incomplete or
/// duplicate arithmetic coverage, and a `CONDITIONAL` entry with no named
/// condition function.
#[derive(Clone, Debug, PartialEq)]
pub enum RegistryViolation {
    /// RR-1: a table-3..5 row names an edge or join type id that does not
    /// appear in the edge-type/join-type tables.
    UnknownTypeReference {
        table: &'static str,
        field: &'static str,
        id: String,
    },
    /// RR-1: a row's `phase_constraint` is not one of `start`/`any`/`end`.
    UnknownPhaseConstraint { edge_type_id: String, value: String },
    /// RR-1: a compatibility row's `result` is not one of
    /// `VALID`/`INVALID`/`CONDITIONAL`.
    UnknownCompatibilityResult {
        edge_type_a: String,
        edge_type_b: String,
        join_type: String,
        value: String,
    },
    /// RR-1: an arithmetic row's `implication` is not one of the four
    /// closed-set laws.
    UnknownArithmeticLaw { join_type: String, value: String },
    /// RR-2: a terminal edge type appears as a side of a compatibility key.
    TerminalEdgeTypeInCompatibility {
        edge_type: knit_types::EdgeType,
        side: &'static str,
    },
    /// RR-3: a join type has no arithmetic entry.
    MissingArithmeticEntry { join_type: knit_types::JoinType },
    /// RR-3: a join type has more than one arithmetic entry.
    DuplicateArithmeticEntry { join_type: knit_types::JoinType },
    /// RR-4: a `CONDITIONAL` compatibility entry has no `condition_fn`.
    ConditionalWithoutConditionFn {
        edge_type_a: knit_types::EdgeType,
        edge_type_b: knit_types::EdgeType,
        join_type: knit_types::JoinType,
    },
}

impl std::fmt::Display for RegistryViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTypeReference { table, field, id } => write!(
                f,
                "RR-1: {table} row references unknown {field} {id:?}"
            ),
            Self::UnknownPhaseConstraint {
                edge_type_id,
                value,
            } => write!(
                f,
                "RR-1: edge type {edge_type_id:?} has unknown phase_constraint {value:?}"
            ),
            Self::UnknownCompatibilityResult {
                edge_type_a,
                edge_type_b,
                join_type,
                value,
            } => write!(
                f,
                "RR-1: compatibility({edge_type_a}, {edge_type_b}, {join_type}) has unknown result {value:?}"
            ),
            Self::UnknownArithmeticLaw { join_type, value } => write!(
                f,
                "RR-1: arithmetic entry for {join_type:?} has unknown implication {value:?}"
            ),
            Self::TerminalEdgeTypeInCompatibility { edge_type, side } => write!(
                f,
                "RR-2: terminal edge type {edge_type:?} appears as {side} of a compatibility key"
            ),
            Self::MissingArithmeticEntry { join_type } => write!(
                f,
                "RR-3: join type {join_type:?} has no arithmetic entry"
            ),
            Self::DuplicateArithmeticEntry { join_type } => write!(
                f,
                "RR-3: join type {join_type:?} has more than one arithmetic entry"
            ),
            Self::ConditionalWithoutConditionFn {
                edge_type_a,
                edge_type_b,
                join_type,
            } => write!(
                f,
                "RR-4: CONDITIONAL compatibility({edge_type_a:?}, {edge_type_b:?}, {join_type:?}) names no condition_fn"
            ),
        }
    }
}

/// Top-level failure to build a [`crate::registry::TopologyRegistry`].
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to parse registry configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error(
        "registry configuration has {} cross-reference violation(s): {}",
        .0.len(),
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
    )]
    Invalid(Vec<RegistryViolation>),
}
