//! Aggregation coordinator: concurrent fan-out, fixed-order fan-in.
//!
//! [`aggregate::aggregate`] dispatches one task per configured source,
//! waits for all of them, and [`merge::assemble`] folds the per-source
//! outcomes into a single [`crate::AggregationOutcome`].

pub mod aggregate;
pub mod merge;
