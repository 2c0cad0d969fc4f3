use serde::{Deserialize, Serialize};

/// The closed set of arithmetic laws a join type may imply.
///
/// Exactly one law is associated with each [`crate::JoinType`] by the
/// topology registry's arithmetic table; the join validator selects the law
/// by looking up `join.join_type`, never by inspecting the law directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArithmeticLaw {
    /// `count_a == count_b`, within tolerance once converted to mm.
    OneToOne,
    /// `count_b == count_a + cast_on_count`, exact equality.
    Additive,
    /// `count_b ≈ floor(count_a * pickup_ratio)`, within tolerance once converted to mm.
    Ratio,
    /// Same comparison as `OneToOne`; kept distinct because it names a
    /// different topological situation (two piles merging) even though the
    /// numeric check is identical.
    Structural,
}

impl ArithmeticLaw {
    /// Parse the `SCREAMING_SNAKE_CASE` wire id used by registry
    /// configuration. Returns `None` on any unrecognized id.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "ONE_TO_ONE" => Some(Self::OneToOne),
            "ADDITIVE" => Some(Self::Additive),
            "RATIO" => Some(Self::Ratio),
            "STRUCTURAL" => Some(Self::Structural),
            _ => None,
        }
    }

    /// The canonical wire id, inverse of [`Self::from_id`].
    pub fn id(&self) -> &'static str {
        match self {
            Self::OneToOne => "ONE_TO_ONE",
            Self::Additive => "ADDITIVE",
            Self::Ratio => "RATIO",
            Self::Structural => "STRUCTURAL",
        }
    }
}
