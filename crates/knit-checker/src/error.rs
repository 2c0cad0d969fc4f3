use serde::{Deserialize, Serialize};

/// Which side of the pipeline a checker error blames.
///
/// `FILLER_ORIGIN` faults the operation stream itself; `GEOMETRIC_ORIGIN`
/// faults the declared boundary counts or the join topology around an
/// otherwise self-consistent operation stream. The distinction exists so a
/// caller can route a correction to the stage that produced the bad value,
/// not just report "something is wrong".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorOrigin {
    FillerOrigin,
    GeometricOrigin,
}

/// One fault found while checking a pattern. This is data returned from
/// [`crate::orchestrator::check_all`], not a `std::error::Error` — nothing
/// in this crate raises a `CheckerError` as control flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckerError {
    pub component_name_or_join_id: String,
    /// Index into the offending `ComponentIR`'s operations, or `-1` for a
    /// join-level or missing-IR error.
    pub operation_index: i64,
    pub message: String,
    pub origin: ErrorOrigin,
}

impl CheckerError {
    pub fn filler(component_name: impl Into<String>, operation_index: i64, message: impl Into<String>) -> Self {
        Self {
            component_name_or_join_id: component_name.into(),
            operation_index,
            message: message.into(),
            origin: ErrorOrigin::FillerOrigin,
        }
    }

    pub fn geometric(
        component_name_or_join_id: impl Into<String>,
        operation_index: i64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            component_name_or_join_id: component_name_or_join_id.into(),
            operation_index,
            message: message.into(),
            origin: ErrorOrigin::GeometricOrigin,
        }
    }
}

/// The entire fallible output of [`crate::orchestrator::check_all`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub passed: bool,
    pub errors: Vec<CheckerError>,
}

impl CheckResult {
    pub fn from_errors(errors: Vec<CheckerError>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
        }
    }
}
