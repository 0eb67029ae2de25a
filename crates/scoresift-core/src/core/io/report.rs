use super::traits::ReportWriter;
use crate::core::models::record::{FieldValue, ScoreRecord};
use std::io::{self, Write};
use thiserror::Error;

pub const MISSING_VALUE: &str = "NA";
pub const TEXT_COLUMN_WIDTH: usize = 20;
const TEXT_COLUMN_SEPARATOR: &str = "  ";
const SUMMARY_RULE_WIDTH: usize = 80;
const SUMMARY_LABEL_WIDTH: usize = 33;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Renders a number the way it appears in CSV cells.
///
/// NaN becomes `NA`; integral values keep a trailing `.0` so that every
/// numeric column reads as floating point. Magnitudes below `1e-4` or at
/// least `1e16` switch to exponent notation with a signed two-digit
/// exponent (`1e-07`, `2.5e+20`).
pub fn format_csv_number(value: f64) -> String {
    if value.is_nan() {
        return MISSING_VALUE.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if let Some(text) = exponent_notation(value) {
        return text;
    }
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn exponent_notation(value: f64) -> Option<String> {
    let shortest = format!("{:e}", value);
    let (mantissa, exponent) = shortest.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    if value == 0.0 || (-4..16).contains(&exponent) {
        return None;
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    Some(format!("{}e{}{:02}", mantissa, sign, exponent.abs()))
}

fn csv_cell(value: Option<&FieldValue>) -> String {
    match value {
        Some(FieldValue::Number(v)) => format_csv_number(*v),
        Some(FieldValue::Text(t)) => t.clone(),
        None => MISSING_VALUE.to_string(),
    }
}

fn text_cell(value: Option<&FieldValue>) -> String {
    match value {
        Some(FieldValue::Number(v)) if !v.is_nan() => {
            format!("{:<width$.2}", v, width = TEXT_COLUMN_WIDTH)
        }
        Some(FieldValue::Text(t)) => format!("{:<width$}", t, width = TEXT_COLUMN_WIDTH),
        _ => format!("{:<width$}", MISSING_VALUE, width = TEXT_COLUMN_WIDTH),
    }
}

/// Comma-separated table with a fixed column order and a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub columns: Vec<String>,
}

impl CsvTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl ReportWriter for CsvTable {
    type Error = ReportError;

    fn write_to(
        &self,
        rows: &[&ScoreRecord],
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.columns)?;
        for row in rows {
            csv_writer.write_record(self.columns.iter().map(|c| csv_cell(row.get(c))))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: String,
    pub value: usize,
}

impl SummaryLine {
    pub fn new(label: impl Into<String>, value: usize) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Fixed-width, human-readable listing followed by an optional statistics block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReport {
    pub columns: Vec<String>,
    pub summary: Vec<SummaryLine>,
}

impl TextReport {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            summary: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: Vec<SummaryLine>) -> Self {
        self.summary = summary;
        self
    }
}

impl ReportWriter for TextReport {
    type Error = ReportError;

    fn write_to(
        &self,
        rows: &[&ScoreRecord],
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let header_line = self
            .columns
            .iter()
            .map(|c| format!("{:<width$}", c, width = TEXT_COLUMN_WIDTH))
            .collect::<Vec<_>>()
            .join(TEXT_COLUMN_SEPARATOR);
        writeln!(writer, "{}", header_line)?;

        for row in rows {
            let row_line = self
                .columns
                .iter()
                .map(|c| text_cell(row.get(c)))
                .collect::<Vec<_>>()
                .join(TEXT_COLUMN_SEPARATOR);
            writeln!(writer, "{}", row_line)?;
        }

        if !self.summary.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "{}", "=".repeat(SUMMARY_RULE_WIDTH))?;
            writeln!(writer, "Summary Statistics:")?;
            for line in &self.summary {
                let label = format!("{}:", line.label);
                writeln!(
                    writer,
                    "{:<width$}{}",
                    label,
                    line.value,
                    width = SUMMARY_LABEL_WIDTH
                )?;
            }
        }
        Ok(())
    }
}
