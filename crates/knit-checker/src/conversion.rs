//! Unit conversion between physical dimensions and stitch/row counts.
//!
//! Every function here is pure. The join validator is the only caller: it
//! needs to turn a stitch- or row-count deviation into millimeters to
//! compare against a declared `physical_tolerance_mm`.

use knit_types::Gauge;

pub const MM_PER_INCH: f64 = 25.4;

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn stitch_count_to_mm(count: f64, gauge: &Gauge) -> f64 {
    inches_to_mm(count / gauge.stitches_per_inch)
}

pub fn row_count_to_mm(count: f64, gauge: &Gauge) -> f64 {
    inches_to_mm(count / gauge.rows_per_inch)
}
