use crate::core::models::record::Header;

/// Finds the first header column whose name starts with `prefix`.
///
/// Matching is case-sensitive and there is no fallback: a header without a
/// matching column yields `None`.
pub fn resolve_column<'a>(header: &'a Header, prefix: &str) -> Option<&'a str> {
    header.iter().find(|column| column.starts_with(prefix))
}
