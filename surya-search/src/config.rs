//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which sources are queried, the per-fetch
//! timeout, and request behaviour. Nothing here is read from disk; hosts
//! build it in memory (or deserialize it from their own settings).

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::SourceId;

/// Configuration for aggregation and content extraction.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Which sources to query, in the order their results are concatenated.
    pub sources: Vec<SourceId>,
    /// Per-fetch HTTP timeout in seconds. Bounds how long one stuck source
    /// can hold up the whole aggregation.
    pub timeout_seconds: u64,
    /// Maximum records kept from any one source. `None` keeps every
    /// complete candidate the backend returns.
    pub max_results_per_source: Option<usize>,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic desktop browser User-Agents.
    pub user_agent: Option<String>,
    /// Replacement base URLs for individual sources (mirrors, mock servers).
    pub endpoint_overrides: BTreeMap<SourceId, String>,
    /// Maximum characters returned by content extraction.
    pub max_content_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sources: SourceId::all().to_vec(),
            timeout_seconds: 10,
            max_results_per_source: None,
            user_agent: None,
            endpoint_overrides: BTreeMap::new(),
            max_content_chars: 100_000,
        }
    }
}

impl SearchConfig {
    /// Config querying only the given sources, everything else default.
    pub fn with_sources(sources: impl IntoIterator<Item = SourceId>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `sources` must not be empty and must not repeat a source
    /// - `timeout_seconds` must be greater than 0
    /// - `max_results_per_source`, if set, must be greater than 0
    /// - `max_content_chars` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be enabled".into(),
            ));
        }
        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(*source) {
                return Err(SearchError::Config(format!(
                    "source listed more than once: {}",
                    source.id()
                )));
            }
        }
        if self.max_results_per_source == Some(0) {
            return Err(SearchError::Config(
                "max_results_per_source must be greater than 0".into(),
            ));
        }
        self.validate_extraction()
    }

    /// Validates only the fields content extraction uses: `timeout_seconds`
    /// and `max_content_chars` must both be greater than 0.
    pub fn validate_extraction(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_content_chars == 0 {
            return Err(SearchError::Config(
                "max_content_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
