use std::collections::HashMap;

use knit_types::Operation;

/// Per-component simulation state. Mutated only through [`execute`].
///
/// Owned exclusively by one in-flight [`crate::simulate::simulate_component`]
/// call; nothing escapes that call except the final value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VMState {
    pub live_stitch_count: i64,
    pub held_stitches: HashMap<String, i64>,
    pub row_counter: i64,
}

impl VMState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_live_stitch_count(live_stitch_count: i64) -> Self {
        Self {
            live_stitch_count,
            ..Self::default()
        }
    }
}

/// A dispatch-time precondition failure. Carries enough to build a
/// `FILLER_ORIGIN` [`crate::error::CheckerError`] but is not itself one —
/// the simulator owns the operation index and component name that turn this
/// into checker output.
#[derive(Clone, Debug, PartialEq)]
pub struct InvalidOperation {
    pub kind: &'static str,
    pub detail: String,
}

impl std::fmt::Display for InvalidOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.detail)
    }
}

/// Apply one operation to `state` in place.
///
/// Every precondition in the nine-row dispatch table is checked before any
/// mutation; a violated precondition leaves `state` untouched and returns
/// `Err`.
pub fn execute(state: &mut VMState, op: &Operation) -> Result<(), InvalidOperation> {
    match op {
        Operation::CastOn { count } => {
            state.live_stitch_count = *count;
            Ok(())
        }
        Operation::WorkEven { rows } => {
            state.row_counter += rows;
            Ok(())
        }
        Operation::IncreaseSection {
            rows,
            stitch_count_after,
        } => {
            if *stitch_count_after < state.live_stitch_count {
                return Err(InvalidOperation {
                    kind: "INCREASE_SECTION",
                    detail: format!(
                        "stitch_count_after ({stitch_count_after}) must be >= live stitch count ({})",
                        state.live_stitch_count
                    ),
                });
            }
            state.row_counter += rows;
            state.live_stitch_count = *stitch_count_after;
            Ok(())
        }
        Operation::DecreaseSection {
            rows,
            stitch_count_after,
        } => decrease(state, "DECREASE_SECTION", *rows, *stitch_count_after),
        Operation::Taper {
            rows,
            stitch_count_after,
        } => decrease(state, "TAPER", *rows, *stitch_count_after),
        Operation::BindOff { count } => {
            if let Some(count) = count {
                if *count != state.live_stitch_count {
                    return Err(InvalidOperation {
                        kind: "BIND_OFF",
                        detail: format!(
                            "declared count ({count}) does not match live stitch count ({})",
                            state.live_stitch_count
                        ),
                    });
                }
            }
            state.live_stitch_count = 0;
            Ok(())
        }
        Operation::Hold { count, label } => hold_or_separate(state, "HOLD", *count, label),
        Operation::Separate { count, label } => hold_or_separate(state, "SEPARATE", *count, label),
        Operation::PickupStitches { count } => {
            if *count < 0 {
                return Err(InvalidOperation {
                    kind: "PICKUP_STITCHES",
                    detail: format!("count must be >= 0, got {count}"),
                });
            }
            state.live_stitch_count += count;
            Ok(())
        }
    }
}

fn decrease(
    state: &mut VMState,
    kind: &'static str,
    rows: i64,
    stitch_count_after: i64,
) -> Result<(), InvalidOperation> {
    if stitch_count_after < 0 || stitch_count_after > state.live_stitch_count {
        return Err(InvalidOperation {
            kind,
            detail: format!(
                "stitch_count_after ({stitch_count_after}) must be between 0 and the live stitch count ({})",
                state.live_stitch_count
            ),
        });
    }
    state.row_counter += rows;
    state.live_stitch_count = stitch_count_after;
    Ok(())
}

fn hold_or_separate(
    state: &mut VMState,
    kind: &'static str,
    count: i64,
    label: &str,
) -> Result<(), InvalidOperation> {
    if count < 0 || count > state.live_stitch_count {
        return Err(InvalidOperation {
            kind,
            detail: format!(
                "count ({count}) must be between 0 and the live stitch count ({})",
                state.live_stitch_count
            ),
        });
    }
    state.live_stitch_count -= count;
    *state.held_stitches.entry(label.to_string()).or_insert(0) += count;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_on_overwrites_live_count() {
        let mut state = VMState::with_live_stitch_count(999);
        execute(&mut state, &Operation::CastOn { count: 40 }).unwrap();
        assert_eq!(state.live_stitch_count, 40);
        assert_eq!(state.row_counter, 0);
    }

    #[test]
    fn work_even_advances_rows_only() {
        let mut state = VMState::with_live_stitch_count(40);
        execute(&mut state, &Operation::WorkEven { rows: 10 }).unwrap();
        assert_eq!(state.live_stitch_count, 40);
        assert_eq!(state.row_counter, 10);
    }

    #[test]
    fn increase_section_rejects_decrease() {
        let mut state = VMState::with_live_stitch_count(40);
        let err = execute(
            &mut state,
            &Operation::IncreaseSection {
                rows: 4,
                stitch_count_after: 39,
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, "INCREASE_SECTION");
        assert_eq!(state.live_stitch_count, 40, "state must be untouched on error");
    }

    #[test]
    fn decrease_section_rejects_out_of_range() {
        let mut state = VMState::with_live_stitch_count(40);
        let err = execute(
            &mut state,
            &Operation::DecreaseSection {
                rows: 4,
                stitch_count_after: 41,
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, "DECREASE_SECTION");
    }

    #[test]
    fn taper_behaves_exactly_like_decrease_section() {
        let mut a = VMState::with_live_stitch_count(40);
        let mut b = a.clone();
        execute(
            &mut a,
            &Operation::DecreaseSection {
                rows: 4,
                stitch_count_after: 30,
            },
        )
        .unwrap();
        execute(
            &mut b,
            &Operation::Taper {
                rows: 4,
                stitch_count_after: 30,
            },
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bind_off_zeroes_live_count() {
        let mut state = VMState::with_live_stitch_count(40);
        execute(&mut state, &Operation::BindOff { count: Some(40) }).unwrap();
        assert_eq!(state.live_stitch_count, 0);
    }

    #[test]
    fn bind_off_rejects_mismatched_count() {
        let mut state = VMState::with_live_stitch_count(40);
        let err = execute(&mut state, &Operation::BindOff { count: Some(39) }).unwrap_err();
        assert_eq!(err.kind, "BIND_OFF");
    }

    #[test]
    fn hold_moves_stitches_into_the_held_map() {
        let mut state = VMState::with_live_stitch_count(40);
        execute(
            &mut state,
            &Operation::Hold {
                count: 10,
                label: "left_front".into(),
            },
        )
        .unwrap();
        assert_eq!(state.live_stitch_count, 30);
        assert_eq!(state.held_stitches["left_front"], 10);
    }

    #[test]
    fn hold_rejects_exceeding_live_count() {
        let mut state = VMState::with_live_stitch_count(10);
        let err = execute(
            &mut state,
            &Operation::Hold {
                count: 20,
                label: "x".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, "HOLD");
        assert_eq!(state.live_stitch_count, 10);
    }

    #[test]
    fn separate_accumulates_into_same_label_as_hold() {
        let mut state = VMState::with_live_stitch_count(40);
        execute(
            &mut state,
            &Operation::Hold {
                count: 5,
                label: "x".into(),
            },
        )
        .unwrap();
        execute(
            &mut state,
            &Operation::Separate {
                count: 5,
                label: "x".into(),
            },
        )
        .unwrap();
        assert_eq!(state.held_stitches["x"], 10);
    }

    #[test]
    fn pickup_stitches_adds_rather_than_overwrites() {
        let mut state = VMState::with_live_stitch_count(5);
        execute(&mut state, &Operation::PickupStitches { count: 20 }).unwrap();
        assert_eq!(state.live_stitch_count, 25);
    }
}
