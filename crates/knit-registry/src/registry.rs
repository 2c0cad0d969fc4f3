use std::collections::HashMap;

use knit_types::{ArithmeticLaw, EdgeType, JoinType, Parameters};

use crate::error::{RegistryError, RegistryViolation};
use crate::source::RegistrySource;
use crate::tables::{CompatibilityResult, EdgeTypeEntry, JoinTypeEntry, RawTables};

/// Ordered, non-commutative lookup key into the compatibility, defaults, and
/// (indirectly, via `join_type`) arithmetic tables.
///
/// `edge_type_a`/`edge_type_b` are never normalized or sorted: `(CAST_ON,
/// LIVE_STITCH, CONTINUATION)` and `(LIVE_STITCH, CAST_ON, CONTINUATION)` are
/// distinct keys that may carry different results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompatibilityKey {
    pub edge_type_a: EdgeType,
    pub edge_type_b: EdgeType,
    pub join_type: JoinType,
}

impl CompatibilityKey {
    pub fn new(edge_type_a: EdgeType, edge_type_b: EdgeType, join_type: JoinType) -> Self {
        Self {
            edge_type_a,
            edge_type_b,
            join_type,
        }
    }
}

/// The five immutable lookup tables governing which edge/join combinations
/// are legal and what arithmetic law each join type obeys.
///
/// Built once via [`Self::load`], which resolves every raw string id against
/// the closed enums and collects every cross-reference violation found
/// before failing — never bailing out on the first bad row.
#[derive(Clone, Debug)]
pub struct TopologyRegistry {
    edge_types: HashMap<EdgeType, EdgeTypeEntry>,
    join_types: HashMap<JoinType, JoinTypeEntry>,
    compatibility: HashMap<CompatibilityKey, CompatibilityResult>,
    defaults: HashMap<CompatibilityKey, Parameters>,
    arithmetic: HashMap<JoinType, ArithmeticLaw>,
}

impl TopologyRegistry {
    /// Load and cross-validate a registry from `source`.
    ///
    /// Every row of every table is resolved independently; unresolvable
    /// references are collected into [`RegistryError::Invalid`] rather than
    /// aborting at the first one, so a caller sees the whole list of what is
    /// wrong with a configuration in one pass.
    pub fn load(source: RegistrySource) -> Result<Self, RegistryError> {
        let raw = source.load_raw()?;
        let mut violations = Vec::new();

        let edge_types = resolve_edge_types(&raw, &mut violations);
        let join_types = resolve_join_types(&raw, &mut violations);
        let compatibility =
            resolve_compatibility(&raw, &edge_types, &join_types, &mut violations);
        let defaults = resolve_defaults(&raw, &edge_types, &join_types, &mut violations);
        let arithmetic = resolve_arithmetic(&raw, &join_types, &mut violations);

        if !violations.is_empty() {
            tracing::error!(
                violation_count = violations.len(),
                "topology registry failed cross-reference validation"
            );
            return Err(RegistryError::Invalid(violations));
        }

        tracing::info!(
            edge_types = edge_types.len(),
            join_types = join_types.len(),
            compatibility_entries = compatibility.len(),
            "topology registry loaded"
        );

        Ok(Self {
            edge_types,
            join_types,
            compatibility,
            defaults,
            arithmetic,
        })
    }

    pub fn edge_type(&self, edge_type: EdgeType) -> Option<&EdgeTypeEntry> {
        self.edge_types.get(&edge_type)
    }

    pub fn join_type(&self, join_type: JoinType) -> Option<&JoinTypeEntry> {
        self.join_types.get(&join_type)
    }

    /// The compatibility result for an ordered `(edge_a, edge_b, join_type)`
    /// triple. A key absent from the table is `INVALID` by definition — the
    /// compatibility table is a closed allow-list, not an exception list.
    pub fn compatibility(
        &self,
        edge_type_a: EdgeType,
        edge_type_b: EdgeType,
        join_type: JoinType,
    ) -> CompatibilityResult {
        let key = CompatibilityKey::new(edge_type_a, edge_type_b, join_type);
        self.compatibility
            .get(&key)
            .cloned()
            .unwrap_or(CompatibilityResult::Invalid)
    }

    /// The arithmetic law a join type obeys. Infallible: `load` guarantees
    /// every member of [`JoinType::ALL`] has exactly one arithmetic entry.
    pub fn arithmetic(&self, join_type: JoinType) -> ArithmeticLaw {
        *self
            .arithmetic
            .get(&join_type)
            .expect("load() guarantees every JoinType has an arithmetic entry")
    }

    /// Default parameter values for an ordered `(edge_a, edge_b, join_type)`
    /// triple, or an empty map if none were configured. Returns an owned
    /// clone so callers may merge in caller-supplied overrides freely.
    pub fn defaults(
        &self,
        edge_type_a: EdgeType,
        edge_type_b: EdgeType,
        join_type: JoinType,
    ) -> Parameters {
        let key = CompatibilityKey::new(edge_type_a, edge_type_b, join_type);
        self.defaults.get(&key).cloned().unwrap_or_default()
    }
}

fn resolve_edge_types(
    raw: &RawTables,
    violations: &mut Vec<RegistryViolation>,
) -> HashMap<EdgeType, EdgeTypeEntry> {
    let mut out = HashMap::new();
    for row in &raw.edge_types {
        let Some(edge_type) = EdgeType::from_id(&row.id) else {
            violations.push(RegistryViolation::UnknownTypeReference {
                table: "edge_types",
                field: "id",
                id: row.id.clone(),
            });
            continue;
        };
        let Some(phase_constraint) = knit_types::PhaseConstraint::from_id(&row.phase_constraint)
        else {
            violations.push(RegistryViolation::UnknownPhaseConstraint {
                edge_type_id: row.id.clone(),
                value: row.phase_constraint.clone(),
            });
            continue;
        };
        out.insert(
            edge_type,
            EdgeTypeEntry {
                has_live_stitches: row.has_live_stitches,
                is_terminal: row.is_terminal,
                phase_constraint,
            },
        );
    }
    out
}

fn resolve_join_types(
    raw: &RawTables,
    violations: &mut Vec<RegistryViolation>,
) -> HashMap<JoinType, JoinTypeEntry> {
    let mut out = HashMap::new();
    for row in &raw.join_types {
        let Some(join_type) = JoinType::from_id(&row.id) else {
            violations.push(RegistryViolation::UnknownTypeReference {
                table: "join_types",
                field: "id",
                id: row.id.clone(),
            });
            continue;
        };
        out.insert(
            join_type,
            JoinTypeEntry {
                symmetric: row.symmetric,
                owned_params: row.owns_parameters.clone(),
                construction_methods: row.construction_methods.clone(),
            },
        );
    }
    out
}

/// Resolves one raw row's trio of id strings against the already-resolved
/// edge/join tables, recording an `UnknownTypeReference` (RR-1) for each
/// unresolvable one. Returns `None` if any part of the trio failed to
/// resolve, since there is no key to index the row under.
fn resolve_triple(
    table: &'static str,
    edge_type_a: &str,
    edge_type_b: &str,
    join_type: &str,
    edge_types: &HashMap<EdgeType, EdgeTypeEntry>,
    join_types: &HashMap<JoinType, JoinTypeEntry>,
    violations: &mut Vec<RegistryViolation>,
) -> Option<(EdgeType, EdgeType, JoinType)> {
    let a = EdgeType::from_id(edge_type_a);
    let b = EdgeType::from_id(edge_type_b);
    let j = JoinType::from_id(join_type);

    if a.is_none() {
        violations.push(RegistryViolation::UnknownTypeReference {
            table,
            field: "edge_type_a",
            id: edge_type_a.to_string(),
        });
    }
    if b.is_none() {
        violations.push(RegistryViolation::UnknownTypeReference {
            table,
            field: "edge_type_b",
            id: edge_type_b.to_string(),
        });
    }
    if j.is_none() {
        violations.push(RegistryViolation::UnknownTypeReference {
            table,
            field: "join_type",
            id: join_type.to_string(),
        });
    }

    let (a, b, j) = (a?, b?, j?);

    if !edge_types.contains_key(&a) {
        violations.push(RegistryViolation::UnknownTypeReference {
            table,
            field: "edge_type_a",
            id: edge_type_a.to_string(),
        });
        return None;
    }
    if !edge_types.contains_key(&b) {
        violations.push(RegistryViolation::UnknownTypeReference {
            table,
            field: "edge_type_b",
            id: edge_type_b.to_string(),
        });
        return None;
    }
    if !join_types.contains_key(&j) {
        violations.push(RegistryViolation::UnknownTypeReference {
            table,
            field: "join_type",
            id: join_type.to_string(),
        });
        return None;
    }

    Some((a, b, j))
}

fn resolve_compatibility(
    raw: &RawTables,
    edge_types: &HashMap<EdgeType, EdgeTypeEntry>,
    join_types: &HashMap<JoinType, JoinTypeEntry>,
    violations: &mut Vec<RegistryViolation>,
) -> HashMap<CompatibilityKey, CompatibilityResult> {
    let mut out = HashMap::new();
    for row in &raw.compatibility {
        let Some((a, b, j)) = resolve_triple(
            "compatibility",
            &row.edge_type_a,
            &row.edge_type_b,
            &row.join_type,
            edge_types,
            join_types,
            violations,
        ) else {
            continue;
        };

        // RR-2: terminal edge types carry no live boundary for a join to act on.
        if edge_types[&a].is_terminal {
            violations.push(RegistryViolation::TerminalEdgeTypeInCompatibility {
                edge_type: a,
                side: "edge_type_a",
            });
            continue;
        }
        if edge_types[&b].is_terminal {
            violations.push(RegistryViolation::TerminalEdgeTypeInCompatibility {
                edge_type: b,
                side: "edge_type_b",
            });
            continue;
        }

        let result = match row.result.as_str() {
            "VALID" => CompatibilityResult::Valid,
            "INVALID" => CompatibilityResult::Invalid,
            "CONDITIONAL" => match &row.condition_fn {
                Some(condition_fn) => CompatibilityResult::Conditional {
                    condition_fn: condition_fn.clone(),
                },
                None => {
                    // RR-4
                    violations.push(RegistryViolation::ConditionalWithoutConditionFn {
                        edge_type_a: a,
                        edge_type_b: b,
                        join_type: j,
                    });
                    continue;
                }
            },
            other => {
                violations.push(RegistryViolation::UnknownCompatibilityResult {
                    edge_type_a: row.edge_type_a.clone(),
                    edge_type_b: row.edge_type_b.clone(),
                    join_type: row.join_type.clone(),
                    value: other.to_string(),
                });
                continue;
            }
        };

        out.insert(CompatibilityKey::new(a, b, j), result);
    }
    out
}

fn resolve_defaults(
    raw: &RawTables,
    edge_types: &HashMap<EdgeType, EdgeTypeEntry>,
    join_types: &HashMap<JoinType, JoinTypeEntry>,
    violations: &mut Vec<RegistryViolation>,
) -> HashMap<CompatibilityKey, Parameters> {
    let mut out = HashMap::new();
    for row in &raw.defaults {
        let Some((a, b, j)) = resolve_triple(
            "defaults",
            &row.edge_type_a,
            &row.edge_type_b,
            &row.join_type,
            edge_types,
            join_types,
            violations,
        ) else {
            continue;
        };
        out.insert(CompatibilityKey::new(a, b, j), row.defaults.clone());
    }
    out
}

fn resolve_arithmetic(
    raw: &RawTables,
    join_types: &HashMap<JoinType, JoinTypeEntry>,
    violations: &mut Vec<RegistryViolation>,
) -> HashMap<JoinType, ArithmeticLaw> {
    let mut out: HashMap<JoinType, ArithmeticLaw> = HashMap::new();
    for row in &raw.arithmetic_implications {
        let Some(join_type) = JoinType::from_id(&row.join_type) else {
            violations.push(RegistryViolation::UnknownTypeReference {
                table: "arithmetic_implications",
                field: "join_type",
                id: row.join_type.clone(),
            });
            continue;
        };
        if !join_types.contains_key(&join_type) {
            violations.push(RegistryViolation::UnknownTypeReference {
                table: "arithmetic_implications",
                field: "join_type",
                id: row.join_type.clone(),
            });
            continue;
        }
        let Some(law) = ArithmeticLaw::from_id(&row.implication) else {
            violations.push(RegistryViolation::UnknownArithmeticLaw {
                join_type: row.join_type.clone(),
                value: row.implication.clone(),
            });
            continue;
        };

        // RR-3: duplicate entry for a join type already seen.
        if out.contains_key(&join_type) {
            violations.push(RegistryViolation::DuplicateArithmeticEntry { join_type });
            continue;
        }
        out.insert(join_type, law);
    }

    // RR-3: every closed-set join type must end up with exactly one entry.
    for join_type in JoinType::ALL {
        if !out.contains_key(&join_type) {
            violations.push(RegistryViolation::MissingArithmeticEntry { join_type });
        }
    }

    out
}
