use crate::core::models::record::ScoreRecord;
use crate::core::utils::ordering::missing_last_key;

/// Whether `record` satisfies `column < cutoff`; absent and NaN values never do.
pub fn passes(record: &ScoreRecord, column: &str, cutoff: f64) -> bool {
    missing_last_key(record.number(column)) < cutoff
}

pub fn apply<'a>(pool: Vec<&'a ScoreRecord>, column: &str, cutoff: f64) -> Vec<&'a ScoreRecord> {
    pool.into_iter()
        .filter(|record| passes(record, column, cutoff))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::{FieldValue, IDENTIFIER_COLUMN};

    fn record(id: &str, cst: Option<f64>) -> ScoreRecord {
        let mut r = ScoreRecord::new();
        r.insert(IDENTIFIER_COLUMN, FieldValue::Text(id.into()));
        if let Some(v) = cst {
            r.insert("all_cst", FieldValue::Number(v));
        }
        r
    }

    #[test]
    fn cutoff_is_strict() {
        assert!(passes(&record("a", Some(0.999)), "all_cst", 1.0));
        assert!(!passes(&record("b", Some(1.0)), "all_cst", 1.0));
        assert!(!passes(&record("c", Some(3.2)), "all_cst", 1.0));
    }

    #[test]
    fn missing_and_nan_values_are_excluded() {
        assert!(!passes(&record("a", None), "all_cst", 1.0));
        assert!(!passes(&record("b", Some(f64::NAN)), "all_cst", 1.0));
        assert!(!passes(&record("c", None), "all_cst", f64::INFINITY));
    }

    #[test]
    fn apply_keeps_passing_records_in_order() {
        let rows = vec![
            record("a", Some(0.2)),
            record("b", Some(5.0)),
            record("c", None),
            record("d", Some(-0.1)),
        ];
        let kept = apply(rows.iter().collect(), "all_cst", 1.0);
        let ids: Vec<_> = kept.iter().filter_map(|r| r.identifier()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }
}
