use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Knitting gauge: stitch and row density per inch.
///
/// Both values must be strictly positive; gauges are immutable after
/// construction and safe to share across joins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub stitches_per_inch: f64,
    pub rows_per_inch: f64,
}

impl Gauge {
    pub fn new(stitches_per_inch: f64, rows_per_inch: f64) -> Result<Self, DomainError> {
        if stitches_per_inch <= 0.0 {
            return Err(DomainError::NonPositiveGaugeDensity {
                field: "stitches_per_inch",
                value: stitches_per_inch,
            });
        }
        if rows_per_inch <= 0.0 {
            return Err(DomainError::NonPositiveGaugeDensity {
                field: "rows_per_inch",
                value: rows_per_inch,
            });
        }
        Ok(Self {
            stitches_per_inch,
            rows_per_inch,
        })
    }
}
