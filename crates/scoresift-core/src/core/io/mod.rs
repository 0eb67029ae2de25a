//! Provides input/output functionality for score tables and selection reports.
//!
//! Reading covers discovery of score files in a working directory and parsing of
//! their whitespace-delimited rows. Writing covers the CSV and fixed-width text
//! reports, built on the [`traits::ReportWriter`] interface, and copying the
//! structure files of selected entries.

pub mod discovery;
pub mod report;
pub mod score_file;
pub mod structures;
pub mod traits;
