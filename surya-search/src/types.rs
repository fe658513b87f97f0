//! Core types: source identifiers, unified result records, and the
//! per-query aggregation outcome.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Returned by content extraction when no recognisable content block exists.
pub const CONTENT_FALLBACK: &str = "Full content could not be extracted.";

/// The fixed set of search backends surya-search can query.
///
/// Declaration order is the default configuration order, and the derived
/// `Ord` is what keys [`AggregationOutcome::failures`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    /// Google web search.
    Google,
    /// Microsoft Bing.
    Bing,
    /// DuckDuckGo HTML-only frontend.
    DuckDuckGo,
    /// Qmamu.
    Qmamu,
    /// Yep.
    Yep,
    /// You.com.
    You,
}

impl SourceId {
    /// Stable lowercase identifier, as used in serialized form and on the CLI.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
            Self::Qmamu => "qmamu",
            Self::Yep => "yep",
            Self::You => "you",
        }
    }

    /// Human-readable backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Bing => "Bing",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Qmamu => "Qmamu",
            Self::Yep => "Yep",
            Self::You => "You",
        }
    }

    /// All backends in default configuration order.
    pub fn all() -> &'static [SourceId] {
        &[
            Self::Google,
            Self::Bing,
            Self::DuckDuckGo,
            Self::Qmamu,
            Self::Yep,
            Self::You,
        ]
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceId {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|source| source.id() == wanted)
            .ok_or_else(|| SearchError::Config(format!("unknown source: {s}")))
    }
}

/// A single result in the unified schema shared by every backend.
///
/// `url` may be absolute or relative to the backend that produced it.
/// Adapters never emit a record with an empty field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Title text of the result.
    pub title: String,
    /// Link target as found in the backend markup.
    pub url: String,
    /// Description or snippet text.
    pub description: String,
    /// Which backend emitted this record.
    pub source: SourceId,
}

/// Broad category of a per-source failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// Network failure, timeout, or non-success status.
    Fetch,
    /// Response body was not a markup document.
    Parse,
    /// The adapter task ended without producing a result (e.g. it panicked).
    Aborted,
}

/// Why one source contributed no results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFailure {
    /// Failure category.
    pub kind: FailureKind,
    /// Human-readable description.
    pub message: String,
}

impl SourceFailure {
    /// A failure for an adapter task that never reported back.
    pub fn aborted(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Aborted,
            message: message.into(),
        }
    }
}

impl From<SearchError> for SourceFailure {
    fn from(err: SearchError) -> Self {
        let kind = match err {
            SearchError::Fetch(_) => FailureKind::Fetch,
            SearchError::Parse(_) => FailureKind::Parse,
            _ => FailureKind::Aborted,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Combined result of one aggregated query.
///
/// `results` are grouped by source in configuration order; within a group
/// they keep the order the backend rendered them in. Duplicate URLs from
/// different sources are kept as separate records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationOutcome {
    /// Records from every successful source.
    pub results: Vec<ResultRecord>,
    /// One entry per source that failed.
    pub failures: BTreeMap<SourceId, SourceFailure>,
    /// When the aggregation was started.
    pub fetched_at: DateTime<Local>,
    /// Display-only summary line naming the query and fetch time.
    pub web_info: String,
}

impl AggregationOutcome {
    /// Records contributed by a single source, in emission order.
    pub fn results_for(&self, source: SourceId) -> impl Iterator<Item = &ResultRecord> {
        self.results.iter().filter(move |r| r.source == source)
    }

    /// True when no source failed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
