use crate::core::models::record::{FieldValue, Header, IDENTIFIER_COLUMN, ScoreRecord};
use crate::core::models::table::ParseTally;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

const COMMENT_MARKER: char = '#';

#[derive(Debug, Error)]
pub enum ScoreFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to read score file '{path}': {source}")]
    File { path: String, source: io::Error },
    #[error("Failed to list directory '{path}': {source}")]
    Directory { path: String, source: io::Error },
}

/// Contents of a single whitespace-delimited score file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedScoreFile {
    pub header: Option<Header>,
    pub records: Vec<ScoreRecord>,
    pub tally: ParseTally,
}

pub struct ScoreFile;

impl ScoreFile {
    /// Parses score rows from a buffered reader.
    ///
    /// The first significant line becomes the header. Later lines repeating the
    /// header's first token, or carrying fewer tokens than the header, are
    /// skipped. Content problems never fail the parse: unparseable numbers
    /// become `NaN`, and bytes that are not valid UTF-8 are decoded lossily.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreFileError::Io`] if reading from `reader` fails.
    pub fn read_from(reader: &mut impl BufRead) -> Result<ParsedScoreFile, ScoreFileError> {
        let mut parsed = ParsedScoreFile::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = decode_line(&buf);

            if line.starts_with(COMMENT_MARKER) || line.trim().is_empty() {
                parsed.tally.ignored_lines += 1;
                continue;
            }

            let tokens: Vec<&str> = line.split_whitespace().collect();

            let Some(header) = &parsed.header else {
                parsed.header = Some(Header::new(tokens));
                parsed.tally.header_lines += 1;
                continue;
            };

            if header.first() == tokens.first().copied() {
                parsed.tally.repeated_headers += 1;
                continue;
            }
            if tokens.len() < header.len() {
                parsed.tally.short_rows += 1;
                continue;
            }

            parsed.records.push(build_record(header, &tokens));
            parsed.tally.data_rows += 1;
        }

        Ok(parsed)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ParsedScoreFile, ScoreFileError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ScoreFileError::File {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader).map_err(|e| match e {
            ScoreFileError::Io(source) => ScoreFileError::File {
                path: path.to_string_lossy().to_string(),
                source,
            },
            other => other,
        })
    }
}

fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

fn build_record(header: &Header, tokens: &[&str]) -> ScoreRecord {
    let mut record = ScoreRecord::with_capacity(header.len());
    for (i, column) in header.iter().enumerate() {
        let value = if column == IDENTIFIER_COLUMN {
            // Identifiers sit at the end of the line regardless of their header position.
            let identifier = tokens.last().map_or("", |t| t.trim());
            FieldValue::Text(identifier.to_string())
        } else {
            FieldValue::Number(tokens.get(i).map_or(f64::NAN, |t| parse_number(t)))
        };
        record.insert(column, value);
    }
    record
}

fn parse_number(token: &str) -> f64 {
    token.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn parse(content: &str) -> ParsedScoreFile {
        ScoreFile::read_from(&mut Cursor::new(content)).unwrap()
    }

    #[test]
    fn first_significant_line_becomes_header() {
        let parsed = parse(
            "# generated by docking run 7\n\
             \n\
             total_score all_cst SR_2_interf_E_1_4_x description\n\
             -410.2 0.35 -21.8 design_0001\n",
        );
        let header = parsed.header.unwrap();
        assert_eq!(
            header.iter().collect::<Vec<_>>(),
            vec!["total_score", "all_cst", "SR_2_interf_E_1_4_x", "description"]
        );
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.tally.header_lines, 1);
        assert_eq!(parsed.tally.ignored_lines, 2);
    }

    #[test]
    fn numeric_columns_parse_and_identifier_takes_last_token() {
        let parsed = parse(
            "total_score all_cst description\n\
             -410.2 0.35 design_0001\n",
        );
        let record = &parsed.records[0];
        assert_eq!(record.number("total_score"), Some(-410.2));
        assert_eq!(record.number("all_cst"), Some(0.35));
        assert_eq!(record.identifier(), Some("design_0001"));
    }

    #[test]
    fn identifier_uses_last_token_even_when_the_row_is_long() {
        let parsed = parse(
            "description total_score\n\
             ignored -12.5 extra design_long\n",
        );
        let record = &parsed.records[0];
        assert_eq!(record.identifier(), Some("design_long"));
        assert_eq!(record.number("total_score"), Some(-12.5));
    }

    #[test]
    fn unparseable_numbers_become_nan_and_rows_are_kept() {
        let parsed = parse(
            "total_score all_cst description\n\
             -410.2 n/a design_0001\n",
        );
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.records[0].number("all_cst").unwrap().is_nan());
    }

    #[test]
    fn repeated_header_and_short_rows_are_skipped() {
        let parsed = parse(
            "total_score all_cst description\n\
             -410.2 0.35 design_0001\n\
             total_score all_cst description\n\
             -380.0 design_0002\n\
             -395.1 0.80 design_0003\n",
        );
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.tally.repeated_headers, 1);
        assert_eq!(parsed.tally.short_rows, 1);
        assert_eq!(parsed.records[1].identifier(), Some("design_0003"));
    }

    #[test]
    fn only_lines_starting_with_marker_are_comments() {
        let parsed = parse(
            "total_score description\n\
             # a comment\n\
             \t  \n\
             -1.0 d1\n",
        );
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.tally.ignored_lines, 2);
    }

    #[test]
    fn invalid_utf8_only_affects_its_own_token() {
        let bytes = b"# run by Jos\xe9\n\
                      total_score all_cst description\r\n\
                      -410.2 0.\xff5 design_0001\r\n\
                      -395.1 0.80 design_0002\n";
        let parsed = ScoreFile::read_from(&mut Cursor::new(&bytes[..])).unwrap();

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.tally.ignored_lines, 1);
        assert!(parsed.records[0].number("all_cst").unwrap().is_nan());
        assert_eq!(parsed.records[0].identifier(), Some("design_0001"));
        assert_eq!(parsed.records[1].number("all_cst"), Some(0.80));
    }

    #[test]
    fn empty_input_yields_no_header() {
        let parsed = parse("# only comments\n\n");
        assert!(parsed.header.is_none());
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn read_from_path_reports_missing_file_with_path() {
        let dir = tempdir().unwrap();
        let result = ScoreFile::read_from_path(dir.path().join("score_missing.sc"));
        assert!(matches!(result, Err(ScoreFileError::File { .. })));
    }

    #[test]
    fn read_from_path_parses_file_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("score_run1.sc");
        fs::write(&path, "total_score description\n-3.5 d1\n-2.0 d2\n").unwrap();

        let parsed = ScoreFile::read_from_path(&path).unwrap();
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.tally.data_rows, 2);
    }
}
