use crate::core::models::record::ScoreRecord;
use std::cmp::Ordering;

/// Maps a column value to a sort key where absent and NaN values rank last.
#[inline]
pub fn missing_last_key(value: Option<f64>) -> f64 {
    match value {
        Some(v) if !v.is_nan() => v,
        _ => f64::INFINITY,
    }
}

/// Total order for "smaller is better" comparisons.
///
/// Absent and NaN values compare greater than every real value, and equal to
/// each other and to `+inf`, so a stable sort keeps their original order.
pub fn compare_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    missing_last_key(a)
        .partial_cmp(&missing_last_key(b))
        .unwrap_or(Ordering::Equal)
}

/// Stable ascending sort of `records` by the numeric value of `column`.
pub fn sort_ascending_by(records: &mut [&ScoreRecord], column: &str) {
    records.sort_by(|a, b| compare_missing_last(a.number(column), b.number(column)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::{FieldValue, IDENTIFIER_COLUMN};

    fn record(id: &str, value: Option<f64>) -> ScoreRecord {
        let mut r = ScoreRecord::new();
        r.insert(IDENTIFIER_COLUMN, FieldValue::Text(id.to_string()));
        if let Some(v) = value {
            r.insert("score", FieldValue::Number(v));
        }
        r
    }

    #[test]
    fn nan_and_missing_rank_after_real_values() {
        assert_eq!(
            compare_missing_last(Some(f64::NAN), Some(1e300)),
            Ordering::Greater
        );
        assert_eq!(compare_missing_last(None, Some(-5.0)), Ordering::Greater);
        assert_eq!(compare_missing_last(Some(-5.0), None), Ordering::Less);
        assert_eq!(compare_missing_last(None, Some(f64::NAN)), Ordering::Equal);
    }

    #[test]
    fn signed_zeros_compare_equal() {
        assert_eq!(compare_missing_last(Some(-0.0), Some(0.0)), Ordering::Equal);
    }

    #[test]
    fn sort_is_stable_and_pushes_missing_to_the_end() {
        let rows = vec![
            record("nan", Some(f64::NAN)),
            record("b", Some(-2.0)),
            record("missing", None),
            record("a", Some(-2.0)),
            record("c", Some(-9.5)),
        ];
        let mut refs: Vec<&ScoreRecord> = rows.iter().collect();
        sort_ascending_by(&mut refs, "score");

        let order: Vec<_> = refs.iter().filter_map(|r| r.identifier()).collect();
        assert_eq!(order, vec!["c", "b", "a", "nan", "missing"]);
    }
}
