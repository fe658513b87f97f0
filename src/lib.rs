//! Surya: multi-source web search for desktop hosts.
//!
//! The search engine itself lives in the `surya-search` crate and is
//! re-exported here. This crate adds:
//!
//! - [`bridge`]: runs searches on a dedicated runtime and hands results back
//!   through pollable / awaitable handles, so UI threads never block
//! - [`render`]: plain-text output for the `surya` CLI

pub mod bridge;
pub mod render;

pub use bridge::{Pending, PendingContent, PendingSearch, SearchBridge};
pub use surya_search::{
    AggregationOutcome, CancellationToken, FailureKind, ResultRecord, SearchConfig, SearchError,
    SourceFailure, SourceId, CONTENT_FALLBACK,
};
