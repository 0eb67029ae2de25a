//! # Core Models Module
//!
//! Data structures for score tables loaded from docking and design runs.
//!
//! ## Key Components
//!
//! - [`record`] - A single parsed row (`ScoreRecord`), its values (`FieldValue`), and the
//!   ordered column list it was parsed against (`Header`)
//! - [`table`] - The flattened collection of all rows loaded from a working directory,
//!   together with per-file parse statistics and schema drift bookkeeping
//!
//! Rows are keyed by column name rather than position, so rows parsed from files with
//! different headers can live side by side in one table. Looking up a column a row does not
//! carry yields `None`, which downstream stages treat as the worst possible value.
//!
//! ```ignore
//! use scoresift::core::models::record::{FieldValue, ScoreRecord};
//!
//! let mut record = ScoreRecord::new();
//! record.insert("all_cst", FieldValue::Number(0.42));
//! assert_eq!(record.number("all_cst"), Some(0.42));
//! ```

pub mod record;
pub mod table;
