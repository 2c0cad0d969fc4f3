use std::collections::HashMap;

use knit_types::{ArithmeticLaw, Gauge, Join};
use knit_registry::TopologyRegistry;

use crate::conversion::stitch_count_to_mm;
use crate::error::CheckerError;

/// Check one join's two edge counts against the arithmetic law its
/// `join_type` implies. Returns `None` when the join is satisfied.
pub fn validate_join(
    join: &Join,
    edge_counts: &HashMap<String, i64>,
    tolerance_mm: f64,
    gauge: &Gauge,
    registry: &TopologyRegistry,
) -> Option<CheckerError> {
    let Some(&count_a) = edge_counts.get(&join.edge_a_ref) else {
        return Some(CheckerError::geometric(
            &join.id,
            -1,
            format!("join references unresolved edge {:?}", join.edge_a_ref),
        ));
    };
    let Some(&count_b) = edge_counts.get(&join.edge_b_ref) else {
        return Some(CheckerError::geometric(
            &join.id,
            -1,
            format!("join references unresolved edge {:?}", join.edge_b_ref),
        ));
    };

    let law = registry.arithmetic(join.join_type);

    match law {
        ArithmeticLaw::OneToOne | ArithmeticLaw::Structural => {
            let deviation_mm = stitch_count_to_mm((count_a - count_b).abs() as f64, gauge);
            if deviation_mm > tolerance_mm {
                Some(CheckerError::geometric(
                    &join.id,
                    -1,
                    format!(
                        "join {:?} ({law:?}): count_a={count_a}, count_b={count_b}, deviation={deviation_mm:.2}mm exceeds tolerance {tolerance_mm:.2}mm",
                        join.id
                    ),
                ))
            } else {
                None
            }
        }
        ArithmeticLaw::Additive => {
            let Some(cast_on_count) = join.parameters.get("cast_on_count").and_then(|v| v.as_i64())
            else {
                return Some(CheckerError::geometric(
                    &join.id,
                    -1,
                    format!(
                        "join {:?} (ADDITIVE): missing or non-integer required parameter cast_on_count",
                        join.id
                    ),
                ));
            };
            let expected_b = count_a + cast_on_count;
            if count_b != expected_b {
                Some(CheckerError::geometric(
                    &join.id,
                    -1,
                    format!(
                        "join {:?} (ADDITIVE): expected count_b={expected_b} (count_a={count_a} + cast_on_count={cast_on_count}), got {count_b}",
                        join.id
                    ),
                ))
            } else {
                None
            }
        }
        ArithmeticLaw::Ratio => {
            let Some(pickup_ratio) = join.parameters.get("pickup_ratio").and_then(|v| v.as_f64())
            else {
                return Some(CheckerError::geometric(
                    &join.id,
                    -1,
                    format!(
                        "join {:?} (RATIO): missing or non-numeric required parameter pickup_ratio",
                        join.id
                    ),
                ));
            };
            let expected_b = (count_a as f64 * pickup_ratio).floor() as i64;
            let deviation_mm = stitch_count_to_mm((count_b - expected_b).abs() as f64, gauge);
            if deviation_mm > tolerance_mm {
                Some(CheckerError::geometric(
                    &join.id,
                    -1,
                    format!(
                        "join {:?} (RATIO): count_a={count_a}, pickup_ratio={pickup_ratio}, expected count_b={expected_b}, got {count_b}, deviation={deviation_mm:.2}mm exceeds tolerance {tolerance_mm:.2}mm",
                        join.id
                    ),
                ))
            } else {
                None
            }
        }
    }
}

/// Validate every join in `joins`, collecting every failure rather than
/// stopping at the first.
pub fn validate_all_joins(
    joins: &[Join],
    edge_counts: &HashMap<String, i64>,
    tolerance_mm: impl Fn(&Join) -> f64,
    gauge: impl Fn(&Join) -> Option<Gauge>,
    registry: &TopologyRegistry,
) -> Vec<CheckerError> {
    let mut errors = Vec::new();
    for join in joins {
        let Some(gauge) = gauge(join) else {
            errors.push(CheckerError::geometric(
                &join.id,
                -1,
                "no gauge available from either joined component; skipping join check",
            ));
            continue;
        };
        if let Some(error) = validate_join(join, edge_counts, tolerance_mm(join), &gauge, registry) {
            errors.push(error);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use knit_registry::RegistrySource;
    use knit_types::{JoinType, ParamValue};

    fn registry() -> TopologyRegistry {
        TopologyRegistry::load(RegistrySource::Embedded).unwrap()
    }

    #[test]
    fn valid_continuation_join_passes() {
        let join = Join::new("j1", JoinType::Continuation, "yoke.body_join", "body.top");
        let counts = HashMap::from([
            ("yoke.body_join".to_string(), 80),
            ("body.top".to_string(), 80),
        ]);
        let gauge = Gauge::new(20.0, 28.0).unwrap();
        let error = validate_join(&join, &counts, 10.0, &gauge, &registry());
        assert!(error.is_none());
    }

    #[test]
    fn mismatched_pickup_fails_with_ratio_deviation() {
        let join = Join::new("j1", JoinType::Pickup, "body.side", "sleeve.cuff")
            .with_parameter("pickup_ratio", ParamValue::Float(0.75));
        let counts = HashMap::from([
            ("body.side".to_string(), 100),
            ("sleeve.cuff".to_string(), 25),
        ]);
        let gauge = Gauge::new(20.0, 28.0).unwrap();
        let error = validate_join(&join, &counts, 10.0, &gauge, &registry()).unwrap();
        assert_eq!(error.component_name_or_join_id, "j1");
        assert!(error.message.contains("RATIO"));
    }

    #[test]
    fn additive_join_requires_exact_equality() {
        let join = Join::new("j1", JoinType::CastOnJoin, "body.hem", "sleeve.cuff")
            .with_parameter("cast_on_count", ParamValue::Int(5));
        let counts = HashMap::from([
            ("body.hem".to_string(), 40),
            ("sleeve.cuff".to_string(), 44),
        ]);
        let gauge = Gauge::new(20.0, 28.0).unwrap();
        let error = validate_join(&join, &counts, 10.0, &gauge, &registry()).unwrap();
        assert!(error.message.contains("ADDITIVE"));
    }

    #[test]
    fn additive_join_missing_cast_on_count_is_an_error_not_a_default() {
        let join = Join::new("j1", JoinType::CastOnJoin, "body.hem", "sleeve.cuff");
        let counts = HashMap::from([
            ("body.hem".to_string(), 40),
            ("sleeve.cuff".to_string(), 40),
        ]);
        let gauge = Gauge::new(20.0, 28.0).unwrap();
        let error = validate_join(&join, &counts, 10.0, &gauge, &registry()).unwrap();
        assert!(error.message.contains("cast_on_count"));
    }

    #[test]
    fn ratio_join_missing_pickup_ratio_is_an_error_not_a_default() {
        let join = Join::new("j1", JoinType::Pickup, "body.side", "sleeve.cuff");
        let counts = HashMap::from([
            ("body.side".to_string(), 100),
            ("sleeve.cuff".to_string(), 100),
        ]);
        let gauge = Gauge::new(20.0, 28.0).unwrap();
        let error = validate_join(&join, &counts, 10.0, &gauge, &registry()).unwrap();
        assert!(error.message.contains("pickup_ratio"));
    }

    #[test]
    fn unresolved_edge_ref_is_reported() {
        let join = Join::new("j1", JoinType::Continuation, "a.x", "b.y");
        let counts = HashMap::new();
        let gauge = Gauge::new(20.0, 28.0).unwrap();
        let error = validate_join(&join, &counts, 10.0, &gauge, &registry()).unwrap();
        assert!(error.message.contains("a.x"));
    }
}
