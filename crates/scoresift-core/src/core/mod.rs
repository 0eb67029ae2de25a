//! # Core Module
//!
//! The foundation layer of scoresift: stateless data models for score tables and the
//! I/O routines that read score files and write selection reports.
//!
//! ## Architecture
//!
//! - **Data Representation** ([`models`]) - Score records, headers, and the loaded table
//! - **File I/O** ([`io`]) - Score file discovery and parsing, CSV and text reports,
//!   structure file copies
//! - **Utilities** ([`utils`]) - The missing-last ordering used by every ranking stage
//!
//! Nothing in this layer knows about pipeline configuration or stage sequencing; that is
//! the job of [`crate::engine`] and [`crate::workflows`].

pub mod io;
pub mod models;
pub mod utils;
