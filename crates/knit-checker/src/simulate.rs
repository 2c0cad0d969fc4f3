use std::collections::HashMap;

use knit_types::{ComponentIR, ComponentSpec, EdgeType, Join, JoinType, Operation};

use crate::error::CheckerError;
use crate::vm::{execute, VMState};

/// Outcome of running one [`ComponentIR`] through the VM.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationResult {
    pub passed: bool,
    pub final_state: VMState,
    pub errors: Vec<CheckerError>,
}

/// Run `ir` through the VM from its setup state to its last operation,
/// collecting every `FILLER_ORIGIN`/`GEOMETRIC_ORIGIN` error along the way.
///
/// No operation is skipped because an earlier one failed: every entry in
/// `ir.operations` is attempted, in order, against whatever state resulted
/// from the previous attempt (unchanged, if that attempt failed).
pub fn simulate_component(ir: &ComponentIR) -> SimulationResult {
    let mut errors = Vec::new();

    if ir.operations.is_empty() {
        errors.push(CheckerError::filler(
            &ir.component_name,
            -1,
            "operation list is empty; nothing to simulate against the declared boundary counts",
        ));
        return SimulationResult {
            passed: false,
            final_state: VMState::new(),
            errors,
        };
    }

    let begins_with_cast_on = matches!(ir.operations[0], Operation::CastOn { .. });
    let mut state = if begins_with_cast_on {
        VMState::new()
    } else {
        VMState::with_live_stitch_count(ir.starting_stitch_count)
    };

    for (index, op) in ir.operations.iter().enumerate() {
        if let Err(invalid) = execute(&mut state, op) {
            errors.push(CheckerError::filler(
                &ir.component_name,
                index as i64,
                invalid.detail,
            ));
        }

        if index == 0 && begins_with_cast_on && state.live_stitch_count != ir.starting_stitch_count
        {
            errors.push(CheckerError::geometric(
                &ir.component_name,
                0,
                format!(
                    "CAST_ON established {} live stitches but starting_stitch_count declares {}",
                    state.live_stitch_count, ir.starting_stitch_count
                ),
            ));
        }
    }

    let last_index = (ir.operations.len() - 1) as i64;
    if state.live_stitch_count != ir.ending_stitch_count {
        errors.push(CheckerError::geometric(
            &ir.component_name,
            last_index,
            format!(
                "final live stitch count {} does not match declared ending_stitch_count {}",
                state.live_stitch_count, ir.ending_stitch_count
            ),
        ));
    }

    SimulationResult {
        passed: errors.is_empty(),
        final_state: state,
        errors,
    }
}

/// Does `edge_ref` (a `"component.edge"` string) appear as the downstream
/// side of a `PICKUP` join in `joins`?
fn is_pickup_downstream(edge_ref: &str, joins: &[Join]) -> bool {
    joins
        .iter()
        .any(|j| j.join_type == JoinType::Pickup && j.edge_b_ref == edge_ref)
}

/// Build the `edge name -> effective count` table for one component's edges.
///
/// `ir` and `sim` must describe the same component as `spec`. Total and
/// deterministic: every edge type has a fallback rule, so this never fails.
pub fn extract_edge_counts(
    ir: &ComponentIR,
    sim: &SimulationResult,
    spec: &ComponentSpec,
    joins: &[Join],
) -> HashMap<String, i64> {
    let begins_with_cast_on = ir
        .operations
        .first()
        .is_some_and(|op| matches!(op, Operation::CastOn { .. }));
    let total_rows = ir.total_rows();

    let mut out = HashMap::with_capacity(spec.edges.len());
    for edge in &spec.edges {
        if let Some(held) = sim.final_state.held_stitches.get(&edge.name) {
            out.insert(edge.name.clone(), *held);
            continue;
        }

        let count = match edge.edge_type {
            EdgeType::BoundOff | EdgeType::Open => ir.ending_stitch_count,
            EdgeType::Selvedge => total_rows,
            EdgeType::LiveStitch => {
                let edge_ref = format!("{}.{}", spec.name, edge.name);
                if is_pickup_downstream(&edge_ref, joins) {
                    ir.starting_stitch_count
                } else if begins_with_cast_on {
                    ir.ending_stitch_count
                } else {
                    ir.starting_stitch_count
                }
            }
            EdgeType::CastOn => ir.starting_stitch_count,
        };
        out.insert(edge.name.clone(), count);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use knit_types::{ComponentIR, Edge, Handedness};

    fn scarf_ir() -> ComponentIR {
        ComponentIR::new(
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
        .unwrap()
    }

    #[test]
    fn plain_scarf_passes_with_no_errors() {
        let ir = scarf_ir();
        let result = simulate_component(&ir);
        assert!(result.passed);
        assert!(result.errors.is_empty());
        assert_eq!(result.final_state.live_stitch_count, 0);
    }

    #[test]
    fn bad_ending_count_emits_geometric_error_on_last_op() {
        let ir = ComponentIR::new(
            "scarf",
            Handedness::None,
            vec![
                Operation::CastOn { count: 40 },
                Operation::WorkEven { rows: 200 },
                Operation::BindOff { count: Some(40) },
            ],
            40,
            80,
        )
        .unwrap();
        let result = simulate_component(&ir);
        assert!(!result.passed);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].operation_index, 2);
        assert_eq!(
            result.errors[0].origin,
            crate::error::ErrorOrigin::GeometricOrigin
        );
    }

    #[test]
    fn illegal_hold_emits_filler_error_at_its_index() {
        let ir = ComponentIR::new(
            "body",
            Handedness::None,
            vec![
                Operation::CastOn { count: 10 },
                Operation::Hold {
                    count: 20,
                    label: "x".into(),
                },
            ],
            10,
            10,
        )
        .unwrap();
        let result = simulate_component(&ir);
        assert!(!result.passed);
        assert_eq!(result.errors[0].operation_index, 1);
        assert_eq!(
            result.errors[0].origin,
            crate::error::ErrorOrigin::FillerOrigin
        );
    }

    #[test]
    fn empty_operation_list_is_one_filler_error() {
        let ir = ComponentIR::new("empty", Handedness::None, vec![], 0, 0).unwrap();
        let result = simulate_component(&ir);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(
            result.errors[0].origin,
            crate::error::ErrorOrigin::FillerOrigin
        );
    }

    #[test]
    fn continuation_component_starts_preloaded() {
        let ir = ComponentIR::new(
            "body",
            Handedness::None,
            vec![Operation::WorkEven { rows: 10 }, Operation::BindOff { count: None }],
            80,
            0,
        )
        .unwrap();
        let result = simulate_component(&ir);
        assert!(result.passed);
    }

    #[test]
    fn selvedge_edge_extracts_total_row_count() {
        let ir = scarf_ir();
        let sim = simulate_component(&ir);
        let spec = knit_types::ComponentSpec::new(
            "scarf",
            knit_types::ShapeType::Rectangle,
            Default::default(),
            vec![Edge::new("side", EdgeType::Selvedge)],
            Handedness::None,
            1,
        )
        .unwrap();
        let counts = extract_edge_counts(&ir, &sim, &spec, &[]);
        assert_eq!(counts["side"], 200);
    }

    #[test]
    fn live_stitch_downstream_of_pickup_extracts_starting_count() {
        let ir = ComponentIR::new(
            "sleeve",
            Handedness::None,
            vec![Operation::PickupStitches { count: 75 }, Operation::BindOff { count: None }],
            75,
            0,
        )
        .unwrap();
        let sim = simulate_component(&ir);
        let spec = knit_types::ComponentSpec::new(
            "sleeve",
            knit_types::ShapeType::Cylinder,
            Default::default(),
            vec![Edge::new("cuff", EdgeType::LiveStitch)],
            Handedness::None,
            1,
        )
        .unwrap();
        let join = Join::new("j1", JoinType::Pickup, "body.side", "sleeve.cuff");
        let counts = extract_edge_counts(&ir, &sim, &spec, std::slice::from_ref(&join));
        assert_eq!(counts["cuff"], 75);
    }
}
