//! Error types for the surya-search crate.
//!
//! Per-source errors ([`SearchError::Fetch`], [`SearchError::Parse`]) are
//! recovered by the aggregator and reported as data in
//! [`crate::AggregationOutcome::failures`]. Only cancellation and
//! coordination failures ever fail a whole `aggregate` call.

/// Errors that can occur during aggregation or content extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The network call failed, timed out, or returned a non-success status.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The response could not be interpreted as a markup document.
    #[error("parse error: {0}")]
    Parse(String),

    /// The caller cancelled the request before every source completed.
    #[error("search cancelled")]
    Cancelled,

    /// The aggregation could not be started at all.
    #[error("coordination failure: {0}")]
    Coordination(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Whether this error belongs to a single source and is therefore
    /// isolated by the aggregator rather than failing the whole call.
    pub fn is_source_failure(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Parse(_))
    }
}

/// Convenience type alias for surya-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
