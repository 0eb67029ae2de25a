use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    MissingSeparator(String),

    #[error("Key cannot be empty in '{0}'.")]
    EmptyKey(String),

    #[error("Invalid {kind} value for '{key}': '{value}'")]
    InvalidValue {
        key: String,
        value: String,
        kind: &'static str,
    },
}

/// Splits a `-S` argument at its first `=`, trimming whitespace around the key.
pub fn parse_key_value(pair: &str) -> Result<(&str, &str), ParseError> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| ParseError::MissingSeparator(pair.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyKey(pair.to_string()));
    }
    Ok((key, value.trim()))
}

pub fn parse_value<T: std::str::FromStr>(
    key: &str,
    value: &str,
    kind: &'static str,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        kind,
    })
}

/// Parses a comma-separated column list, dropping empty entries.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_equals_sign() {
        assert_eq!(
            parse_key_value("output.report = a=b.txt"),
            Ok(("output.report", "a=b.txt"))
        );
    }

    #[test]
    fn rejects_missing_separator_and_empty_key() {
        assert_eq!(
            parse_key_value("selection.top-k"),
            Err(ParseError::MissingSeparator("selection.top-k".into()))
        );
        assert_eq!(
            parse_key_value("=5"),
            Err(ParseError::EmptyKey("=5".into()))
        );
    }

    #[test]
    fn parses_typed_values() {
        assert_eq!(parse_value::<usize>("selection.top-k", "5", "integer"), Ok(5));
        assert_eq!(
            parse_value::<f64>("selection.constraint-cutoff", "x", "float"),
            Err(ParseError::InvalidValue {
                key: "selection.constraint-cutoff".into(),
                value: "x".into(),
                kind: "float",
            })
        );
    }

    #[test]
    fn parses_column_lists() {
        assert_eq!(
            parse_list("description, total_score,,{criterion}"),
            vec!["description", "total_score", "{criterion}"]
        );
    }
}
