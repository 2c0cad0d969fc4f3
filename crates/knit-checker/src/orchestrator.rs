use std::collections::HashMap;

use knit_registry::TopologyRegistry;
use knit_types::{Constraint, Join, ShapeManifest};

use crate::error::{CheckResult, CheckerError};
use crate::joins::validate_join;
use crate::simulate::{extract_edge_counts, simulate_component};

/// Fallback tolerance used when neither joined component supplies a
/// `Constraint`. Matches the documented default a join check falls back to
/// rather than refusing to run at all.
const DEFAULT_TOLERANCE_MM: f64 = 10.0;

/// Top-level entry point. Simulates every component, merges their edge
/// counts into one flat table, then validates every declared join against
/// it. Never short-circuits: every component is simulated and every join is
/// attempted regardless of earlier failures.
pub fn check_all(
    manifest: &ShapeManifest,
    irs: &HashMap<String, knit_types::ComponentIR>,
    constraints: &HashMap<String, Constraint>,
    registry: &TopologyRegistry,
) -> CheckResult {
    let mut errors = Vec::new();
    let mut edge_counts: HashMap<String, i64> = HashMap::new();

    for spec in &manifest.components {
        let Some(ir) = irs.get(&spec.name) else {
            errors.push(CheckerError::geometric(
                &spec.name,
                -1,
                "no IR supplied for this component",
            ));
            continue;
        };

        tracing::debug!(component = %spec.name, "entering simulation");
        let sim = simulate_component(ir);
        for error in &sim.errors {
            tracing::warn!(component = %spec.name, message = %error.message, "checker error");
        }
        errors.extend(sim.errors.clone());

        let counts = extract_edge_counts(ir, &sim, spec, &manifest.joins);
        for (edge_name, count) in counts {
            edge_counts.insert(format!("{}.{}", spec.name, edge_name), count);
        }
    }

    for join in &manifest.joins {
        let tolerance_mm = join_tolerance(join, constraints);
        let Some(gauge) = join_gauge(join, constraints) else {
            let error = CheckerError::geometric(
                &join.id,
                -1,
                "no gauge available from either joined component; skipping join check",
            );
            tracing::warn!(join = %join.id, message = %error.message, "checker error");
            errors.push(error);
            continue;
        };

        if let Some(error) = validate_join(join, &edge_counts, tolerance_mm, &gauge, registry) {
            tracing::warn!(join = %join.id, message = %error.message, "checker error");
            errors.push(error);
        }
    }

    let result = CheckResult::from_errors(errors);
    tracing::info!(
        passed = result.passed,
        error_count = result.errors.len(),
        "check_all complete"
    );
    result
}

fn join_constraint<'a>(
    edge_ref: &str,
    constraints: &'a HashMap<String, Constraint>,
) -> Option<&'a Constraint> {
    let component_name = Join::component_of(edge_ref);
    constraints.get(component_name)
}

/// Minimum of the two joined components' declared tolerances, falling back
/// to [`DEFAULT_TOLERANCE_MM`] for either side missing a `Constraint` — the
/// stricter side always wins.
fn join_tolerance(join: &Join, constraints: &HashMap<String, Constraint>) -> f64 {
    let a = join_constraint(&join.edge_a_ref, constraints)
        .map(|c| c.physical_tolerance_mm)
        .unwrap_or(DEFAULT_TOLERANCE_MM);
    let b = join_constraint(&join.edge_b_ref, constraints)
        .map(|c| c.physical_tolerance_mm)
        .unwrap_or(DEFAULT_TOLERANCE_MM);
    a.min(b)
}

/// Gauge for a join's arithmetic, preferring `edge_a`'s component and
/// falling back to `edge_b`'s. `None` if neither joined component supplies
/// a `Constraint`.
fn join_gauge(join: &Join, constraints: &HashMap<String, Constraint>) -> Option<knit_types::Gauge> {
    join_constraint(&join.edge_a_ref, constraints)
        .or_else(|| join_constraint(&join.edge_b_ref, constraints))
        .map(|c| c.gauge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use knit_registry::RegistrySource;
    use knit_types::{
        ComponentIR, ComponentSpec, Edge, EdgeType, Gauge, Handedness, JoinType, Operation,
        ShapeType, StitchMotif, YarnSpec,
    };
    use std::collections::BTreeMap;

    fn registry() -> TopologyRegistry {
        TopologyRegistry::load(RegistrySource::Embedded).unwrap()
    }

    fn constraint(tolerance_mm: f64) -> Constraint {
        Constraint {
            gauge: Gauge::new(20.0, 28.0).unwrap(),
            stitch_motif: StitchMotif {
                name: "stockinette".into(),
                stitch_repeat: 1,
                row_repeat: 1,
            },
            hard_constraints: vec![],
            yarn_spec: YarnSpec {
                weight: "worsted".into(),
                fiber: "wool".into(),
                needle_size_mm: 4.5,
            },
            physical_tolerance_mm: tolerance_mm,
        }
    }

    #[test_log::test]
    fn plain_scarf_passes_with_no_joins() {
        let spec = ComponentSpec::new(
            "scarf",
            ShapeType::Rectangle,
            BTreeMap::new(),
            vec![
                Edge::new("cast_on_edge", EdgeType::CastOn),
                Edge::new("bind_off_edge", EdgeType::BoundOff),
            ],
            Handedness::None,
            1,
        )
        .unwrap();
        let manifest = ShapeManifest::new(vec![spec], vec![]).unwrap();

        let ir = ComponentIR::new(
            "scarf",
            Handedness::None,
            vec![
                Operation::CastOn { count: 40 },
                Operation::WorkEven { rows: 200 },
                Operation::BindOff { count: Some(40) },
            ],
            40,
            0,
        )
        .unwrap();
        let irs = HashMap::from([("scarf".to_string(), ir)]);

        let result = check_all(&manifest, &irs, &HashMap::new(), &registry());
        assert!(result.passed);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn missing_ir_emits_geometric_error_and_does_not_panic() {
        let spec = ComponentSpec::new(
            "scarf",
            ShapeType::Rectangle,
            BTreeMap::new(),
            vec![],
            Handedness::None,
            1,
        )
        .unwrap();
        let manifest = ShapeManifest::new(vec![spec], vec![]).unwrap();

        let result = check_all(&manifest, &HashMap::new(), &HashMap::new(), &registry());
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].component_name_or_join_id, "scarf");
    }

    #[test]
    fn valid_continuation_join_across_two_components_passes() {
        let yoke = ComponentSpec::new(
            "yoke",
            ShapeType::Trapezoid,
            BTreeMap::new(),
            vec![Edge::new("body_join", EdgeType::LiveStitch).with_join_ref("j1")],
            Handedness::None,
            1,
        )
        .unwrap();
        let body = ComponentSpec::new(
            "body",
            ShapeType::Cylinder,
            BTreeMap::new(),
            vec![Edge::new("top", EdgeType::LiveStitch).with_join_ref("j1")],
            Handedness::None,
            1,
        )
        .unwrap();
        let join = Join::new("j1", JoinType::Continuation, "yoke.body_join", "body.top");
        let manifest = ShapeManifest::new(vec![yoke, body], vec![join]).unwrap();

        let yoke_ir = ComponentIR::new(
            "yoke",
            Handedness::None,
            vec![
                Operation::CastOn { count: 40 },
                Operation::IncreaseSection {
                    rows: 20,
                    stitch_count_after: 80,
                },
            ],
            40,
            80,
        )
        .unwrap();
        let body_ir = ComponentIR::new(
            "body",
            Handedness::None,
            vec![Operation::WorkEven { rows: 50 }, Operation::BindOff { count: None }],
            80,
            0,
        )
        .unwrap();
        let irs = HashMap::from([
            ("yoke".to_string(), yoke_ir),
            ("body".to_string(), body_ir),
        ]);
        let constraints = HashMap::from([
            ("yoke".to_string(), constraint(10.0)),
            ("body".to_string(), constraint(10.0)),
        ]);

        let result = check_all(&manifest, &irs, &constraints, &registry());
        assert!(result.passed, "errors: {:?}", result.errors);
    }
}
