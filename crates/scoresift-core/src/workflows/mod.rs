//! # Workflows Module
//!
//! High-level entry points that run the selection pipeline end to end.
//!
//! ## Architecture
//!
//! - **Load Workflow** ([`load`]) - Discovers and parses every score file in a working
//!   directory into a single [`crate::core::models::table::ScoreTable`]
//! - **Selection Workflow** ([`select`]) - Resolves the criterion column and runs the
//!   constraint, quantile and ranking stages
//! - **Export Workflow** ([`export`]) - Writes the CSV and text reports and copies the
//!   structure files of the selected entries
//!
//! Each workflow reports its phases through an
//! [`crate::engine::progress::ProgressReporter`] and logs through `tracing`; neither
//! affects the result.

pub mod export;
pub mod load;
pub mod select;
