//! # scoresift Core Library
//!
//! Loads whitespace-delimited design score tables, narrows them down through a
//! configurable filter-and-rank pipeline, and exports the best candidates as reports
//! alongside their structure files.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers throughout:
//!
//! - **[`core`]: The Foundation.** Stateless score records and headers, the score file
//!   reader, report writers, and the missing-last ordering.
//!
//! - **[`engine`]: The Logic Core.** Pipeline configuration with its presets and
//!   validation, the individual selection stages, errors, and progress events.
//!
//! - **[`workflows`]: The Public API.** Load, select and export, each callable on its
//!   own so that a caller can inspect the selection before anything is written.

pub mod core;
pub mod engine;
pub mod workflows;
