use super::record::{Header, ScoreRecord};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::warn;

/// Line counts gathered while parsing a single score file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseTally {
    pub header_lines: usize,
    pub data_rows: usize,
    pub repeated_headers: usize,
    pub short_rows: usize,
    pub ignored_lines: usize, // blank or comment
}

impl ParseTally {
    pub fn accumulate(&mut self, other: &ParseTally) {
        self.header_lines += other.header_lines;
        self.data_rows += other.data_rows;
        self.repeated_headers += other.repeated_headers;
        self.short_rows += other.short_rows;
        self.ignored_lines += other.ignored_lines;
    }
}

/// Number of distinct identifiers, counting rows without one as a single entry.
pub fn count_unique_identifiers(records: &[ScoreRecord]) -> usize {
    records
        .iter()
        .map(ScoreRecord::identifier)
        .collect::<HashSet<_>>()
        .len()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub header: Option<Header>,
    pub tally: ParseTally,
}

/// Every record loaded from a working directory, flattened across files.
///
/// `header` is the header of the last file that had one. Files are not
/// required to agree on their header; files whose header differs from the
/// first one seen are listed in `drifted_files`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    pub records: Vec<ScoreRecord>,
    pub header: Header,
    pub files: Vec<FileSummary>,
    pub drifted_files: Vec<PathBuf>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(
        &mut self,
        path: PathBuf,
        header: Option<Header>,
        records: Vec<ScoreRecord>,
        tally: ParseTally,
    ) {
        if let Some(file_header) = &header {
            let reference = self.files.iter().find_map(|f| f.header.as_ref());
            if let Some(reference) = reference {
                if reference != file_header {
                    warn!(
                        "Header of {:?} differs from the first score file; the last header wins for reporting.",
                        path
                    );
                    self.drifted_files.push(path.clone());
                }
            }
            self.header = file_header.clone();
        }
        self.records.extend(records);
        self.files.push(FileSummary {
            path,
            header,
            tally,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn has_schema_drift(&self) -> bool {
        !self.drifted_files.is_empty()
    }

    pub fn unique_identifiers(&self) -> usize {
        count_unique_identifiers(&self.records)
    }

    pub fn total_tally(&self) -> ParseTally {
        let mut total = ParseTally::default();
        for file in &self.files {
            total.accumulate(&file.tally);
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::record::{FieldValue, IDENTIFIER_COLUMN};

    fn record(id: &str) -> ScoreRecord {
        let mut r = ScoreRecord::new();
        r.insert(IDENTIFIER_COLUMN, FieldValue::Text(id.to_string()));
        r
    }

    #[test]
    fn last_header_wins_and_drift_is_recorded() {
        let mut table = ScoreTable::new();
        table.absorb(
            "score_a.sc".into(),
            Some(Header::new(["total_score", "description"])),
            vec![record("a")],
            ParseTally::default(),
        );
        table.absorb(
            "score_b.sc".into(),
            Some(Header::new(["total_score", "all_cst", "description"])),
            vec![record("b")],
            ParseTally::default(),
        );

        assert_eq!(table.len(), 2);
        assert_eq!(table.header.len(), 3);
        assert!(table.has_schema_drift());
        assert_eq!(table.drifted_files, vec![PathBuf::from("score_b.sc")]);
    }

    #[test]
    fn file_without_header_keeps_previous_header() {
        let mut table = ScoreTable::new();
        table.absorb(
            "score_a.sc".into(),
            Some(Header::new(["total_score", "description"])),
            vec![],
            ParseTally::default(),
        );
        table.absorb("score_b.sc".into(), None, vec![], ParseTally::default());

        assert_eq!(table.header, Header::new(["total_score", "description"]));
        assert!(!table.has_schema_drift());
    }

    #[test]
    fn unique_identifiers_counts_distinct_descriptions() {
        let mut table = ScoreTable::new();
        table.absorb(
            "score.sc".into(),
            Some(Header::new(["description"])),
            vec![record("a"), record("b"), record("a"), ScoreRecord::new()],
            ParseTally::default(),
        );
        assert_eq!(table.unique_identifiers(), 3);
    }

    #[test]
    fn total_tally_sums_per_file_counts() {
        let mut table = ScoreTable::new();
        let tally = ParseTally {
            header_lines: 1,
            data_rows: 4,
            repeated_headers: 1,
            short_rows: 2,
            ignored_lines: 3,
        };
        table.absorb("score_a.sc".into(), None, vec![], tally);
        table.absorb("score_b.sc".into(), None, vec![], tally);

        let total = table.total_tally();
        assert_eq!(total.data_rows, 8);
        assert_eq!(total.short_rows, 4);
        assert_eq!(total.ignored_lines, 6);
    }
}
