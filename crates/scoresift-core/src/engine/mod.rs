//! # Engine Module
//!
//! The selection engine: pipeline configuration, the filter and ranking stages, progress
//! reporting and the error taxonomy shared by the workflows.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - `SelectionConfig` and `OutputConfig`, the builder that
//!   validates them, and the built-in presets
//! - **Stages** ([`stages`]) - Criterion resolution, constraint filter, quantile filter and
//!   final ranking, each a pure function over a pool of record references
//! - **Progress Monitoring** ([`progress`]) - Optional callback-based event reporting
//! - **Error Handling** ([`error`]) - `EngineError`, the only failure type the workflows raise
//!
//! ## Ordering Policy
//!
//! Every stage ranks "smaller is better". Absent and NaN values are ordered after all real
//! values and sorts are stable, so the outcome depends only on the input order of the
//! records and never on how NaN happens to compare.

pub mod config;
pub mod error;
pub mod progress;
pub mod stages;
