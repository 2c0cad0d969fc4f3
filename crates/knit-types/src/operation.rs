use serde::{Deserialize, Serialize};

use crate::component::Handedness;
use crate::error::DomainError;

/// One instruction in a component's operation stream.
///
/// Nine kinds, exhaustive by design: adding a tenth must be a compile error
/// everywhere this is matched (the VM dispatch table in `knit-checker`
/// above all). `Taper` is carried as its own variant purely so downstream
/// consumers (e.g. a future prose writer) can tell it apart from
/// `DecreaseSection`; the VM itself treats the two identically.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    CastOn {
        count: i64,
    },
    WorkEven {
        rows: i64,
    },
    IncreaseSection {
        rows: i64,
        stitch_count_after: i64,
    },
    DecreaseSection {
        rows: i64,
        stitch_count_after: i64,
    },
    Taper {
        rows: i64,
        stitch_count_after: i64,
    },
    BindOff {
        count: Option<i64>,
    },
    Hold {
        count: i64,
        label: String,
    },
    Separate {
        count: i64,
        label: String,
    },
    PickupStitches {
        count: i64,
    },
}

impl Operation {
    /// Local, shape-only validation: every count/row field must be
    /// non-negative. This does not check the operation against any VM
    /// state — that precondition check happens at dispatch time in
    /// `knit-checker`, since it depends on the live stitch count at the
    /// moment the operation runs.
    pub fn validate(&self) -> Result<(), DomainError> {
        let check = |field: &'static str, value: i64| -> Result<(), DomainError> {
            if value < 0 {
                Err(DomainError::NegativeCount { field, value })
            } else {
                Ok(())
            }
        };

        match self {
            Self::CastOn { count } => check("CAST_ON.count", *count),
            Self::WorkEven { rows } => check("WORK_EVEN.rows", *rows),
            Self::IncreaseSection {
                rows,
                stitch_count_after,
            } => {
                check("INCREASE_SECTION.rows", *rows)?;
                check("INCREASE_SECTION.stitch_count_after", *stitch_count_after)
            }
            Self::DecreaseSection {
                rows,
                stitch_count_after,
            } => {
                check("DECREASE_SECTION.rows", *rows)?;
                check("DECREASE_SECTION.stitch_count_after", *stitch_count_after)
            }
            Self::Taper {
                rows,
                stitch_count_after,
            } => {
                check("TAPER.rows", *rows)?;
                check("TAPER.stitch_count_after", *stitch_count_after)
            }
            Self::BindOff { count } => match count {
                Some(count) => check("BIND_OFF.count", *count),
                None => Ok(()),
            },
            Self::Hold { count, .. } => check("HOLD.count", *count),
            Self::Separate { count, .. } => check("SEPARATE.count", *count),
            Self::PickupStitches { count } => check("PICKUP_STITCHES.count", *count),
        }
    }

    /// Row count this operation contributes to the component's total,
    /// used by selvedge edge-count extraction. Only row-bearing operations
    /// contribute; `HOLD`/`SEPARATE`/`BIND_OFF`/`PICKUP_STITCHES` work zero
    /// rows by definition of the instruction.
    pub fn row_count(&self) -> i64 {
        match self {
            Self::WorkEven { rows }
            | Self::IncreaseSection { rows, .. }
            | Self::DecreaseSection { rows, .. }
            | Self::Taper { rows, .. } => *rows,
            Self::CastOn { .. }
            | Self::BindOff { .. }
            | Self::Hold { .. }
            | Self::Separate { .. }
            | Self::PickupStitches { .. } => 0,
        }
    }
}

/// The full declared operation stream for one component instance, plus the
/// boundary stitch counts the stream is expected to reconcile with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentIR {
    pub component_name: String,
    pub handedness: Handedness,
    pub operations: Vec<Operation>,
    pub starting_stitch_count: i64,
    pub ending_stitch_count: i64,
}

impl ComponentIR {
    pub fn new(
        component_name: impl Into<String>,
        handedness: Handedness,
        operations: Vec<Operation>,
        starting_stitch_count: i64,
        ending_stitch_count: i64,
    ) -> Result<Self, DomainError> {
        let component_name = component_name.into();
        if component_name.is_empty() {
            return Err(DomainError::EmptyComponentName);
        }
        if starting_stitch_count < 0 {
            return Err(DomainError::NegativeCount {
                field: "starting_stitch_count",
                value: starting_stitch_count,
            });
        }
        if ending_stitch_count < 0 {
            return Err(DomainError::NegativeCount {
                field: "ending_stitch_count",
                value: ending_stitch_count,
            });
        }
        for op in &operations {
            op.validate()?;
        }

        Ok(Self {
            component_name,
            handedness,
            operations,
            starting_stitch_count,
            ending_stitch_count,
        })
    }

    /// Sum of every operation's contributed row count. Used by `SELVEDGE`
    /// edge-count extraction.
    pub fn total_rows(&self) -> i64 {
        self.operations.iter().map(Operation::row_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_operation_counts() {
        let err = Operation::Hold {
            count: -1,
            label: "x".into(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::NegativeCount {
                field: "HOLD.count",
                value: -1,
            }
        );
    }

    #[test]
    fn accepts_bind_off_with_no_count() {
        assert!(Operation::BindOff { count: None }.validate().is_ok());
    }

    #[test]
    fn rejects_empty_component_name() {
        let err = ComponentIR::new("", Handedness::None, vec![], 0, 0).unwrap_err();
        assert_eq!(err, DomainError::EmptyComponentName);
    }

    #[test]
    fn rejects_negative_boundary_counts() {
        let err = ComponentIR::new("scarf", Handedness::None, vec![], -1, 0).unwrap_err();
        assert_eq!(
            err,
            DomainError::NegativeCount {
                field: "starting_stitch_count",
                value: -1,
            }
        );
    }

    #[test]
    fn total_rows_sums_only_row_bearing_operations() {
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
        assert_eq!(ir.total_rows(), 200);
    }
}
