//! The individual filter and ranking stages of the selection pipeline.
//!
//! Each stage takes the current pool of record references and returns the
//! reduced pool; none of them mutates a record. They are sequenced by
//! [`crate::workflows::select`].

pub mod constraint;
pub mod criterion;
pub mod quantile;
pub mod ranking;
