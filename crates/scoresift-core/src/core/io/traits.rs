use crate::core::models::record::ScoreRecord;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for rendering a ranked selection into an output format.
///
/// Implementors describe the layout (which columns, how values are rendered);
/// the trait supplies the file handling so that every report is written
/// through a buffered writer that is flushed before the file is closed.
pub trait ReportWriter {
    /// The error type for rendering and I/O operations.
    type Error: Error + From<io::Error>;

    /// Writes the report for `rows`, in the given order, to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the writer reports an I/O failure.
    fn write_to(&self, rows: &[&ScoreRecord], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes the report to `path`, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        &self,
        rows: &[&ScoreRecord],
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(rows, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
