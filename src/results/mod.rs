//! Result aggregation.
//!
//! Folds the ordered invocation outcomes plus any compile diagnostics
//! into one immutable [`RunResults`] handed back to the caller.

/// Aggregated run results
pub mod aggregation;

pub use aggregation::RunResults;
