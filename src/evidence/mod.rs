//! Evidence analysis: scoring raw search results into an availability verdict.
//!
//! The analyzer filters out results that mention neither the broker nor the
//! country, matches surviving result text against fixed positive/negative
//! indicator phrase lists, folds the matches into running scores, and applies
//! the threshold decision rule to produce a verdict with confidence and a
//! human-readable evidence summary.

pub mod analyze;
pub mod indicators;

pub use analyze::{analyze, Verdict};
