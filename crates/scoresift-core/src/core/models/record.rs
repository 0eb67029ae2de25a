use std::collections::HashMap;

/// Column that carries the entry identifier instead of a numeric measurement.
pub const IDENTIFIER_COLUMN: &str = "description";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64), // NaN when the token was not a valid float
    Text(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Number(_) => None,
        }
    }
}

/// One parsed data row of a score file, keyed by column name.
///
/// The key set mirrors the header of the file the row came from. Lookups of
/// columns that file did not carry return `None` instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreRecord {
    fields: HashMap<String, FieldValue>,
}

impl ScoreRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, value: FieldValue) {
        self.fields.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// Returns the numeric value of `column`.
    ///
    /// `None` means the column is absent or holds text; `Some(NaN)` means the
    /// column is present but its token could not be parsed.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(FieldValue::as_number)
    }

    pub fn identifier(&self) -> Option<&str> {
        self.get(IDENTIFIER_COLUMN).and_then(FieldValue::as_text)
    }
}

/// Ordered column names taken from the first significant line of a score file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.columns.first().map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ScoreRecord {
        let mut record = ScoreRecord::new();
        record.insert("total_score", FieldValue::Number(-412.7));
        record.insert("all_cst", FieldValue::Number(f64::NAN));
        record.insert(IDENTIFIER_COLUMN, FieldValue::Text("design_0001".into()));
        record
    }

    #[test]
    fn number_lookup_distinguishes_missing_from_unparseable() {
        let record = sample_record();
        assert_eq!(record.number("total_score"), Some(-412.7));
        assert!(record.number("all_cst").unwrap().is_nan());
        assert_eq!(record.number("SR_2_interf_E_1_4"), None);
    }

    #[test]
    fn number_lookup_on_text_column_is_none() {
        let record = sample_record();
        assert_eq!(record.number(IDENTIFIER_COLUMN), None);
    }

    #[test]
    fn identifier_reads_the_description_column() {
        let record = sample_record();
        assert_eq!(record.identifier(), Some("design_0001"));
        assert!(ScoreRecord::new().identifier().is_none());
    }

    #[test]
    fn header_preserves_column_order() {
        let header = Header::new(["total_score", "all_cst", "description"]);
        assert_eq!(header.first(), Some("total_score"));
        assert_eq!(
            header.iter().collect::<Vec<_>>(),
            vec!["total_score", "all_cst", "description"]
        );
        assert!(header.contains("all_cst"));
        assert!(!header.contains("dsasa"));
        assert_eq!(header.len(), 3);
    }
}
