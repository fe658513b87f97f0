//! # surya-search
//!
//! Multi-source web search aggregation: one query, several independent
//! search backends, one ordered result set.
//!
//! ## Design
//!
//! - Scrapes Google, Bing, DuckDuckGo, Qmamu, Yep, and You.com using CSS
//!   selectors on HTML responses, one declarative descriptor per backend
//! - Queries every configured source concurrently on its own task
//! - Results are grouped by source in configuration order; no ranking and no
//!   cross-source de-duplication
//! - Graceful degradation: a failing source becomes an entry in
//!   [`AggregationOutcome::failures`], never an error for the whole query
//! - Stateless: no cache, no cookies, no retries
//! - Per-fetch timeout and per-call cancellation
//!
//! ## Security
//!
//! - No API keys or secrets
//! - Search queries are logged only at trace level

pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod types;

pub use config::SearchConfig;
pub use engine::SourceAdapter;
pub use error::{Result, SearchError};
pub use tokio_util::sync::CancellationToken;
pub use types::{
    AggregationOutcome, FailureKind, ResultRecord, SourceFailure, SourceId, CONTENT_FALLBACK,
};

/// Search every source in `config` concurrently and combine the results.
///
/// Waits for every source to finish or fail. Failing sources are listed
/// in [`AggregationOutcome::failures`]; the call itself still succeeds.
///
/// # Errors
///
/// Returns [`SearchError::Config`] or [`SearchError::Coordination`] if the
/// aggregation cannot be started.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> surya_search::Result<()> {
/// let config = surya_search::SearchConfig::default();
/// let outcome = surya_search::aggregate("rust ownership", &config).await?;
/// println!("{}", outcome.web_info);
/// for result in &outcome.results {
///     println!("[{}] {}: {}", result.source, result.title, result.url);
/// }
/// for (source, failure) in &outcome.failures {
///     eprintln!("{source} failed: {failure}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn aggregate(query: &str, config: &SearchConfig) -> Result<AggregationOutcome> {
    aggregate_with_cancel(query, config, &CancellationToken::new()).await
}

/// Like [`aggregate`], but abandons every in-flight fetch when `cancel`
/// fires.
///
/// # Errors
///
/// Same as [`aggregate`], plus [`SearchError::Cancelled`] if cancelled
/// before every source completed. No partial outcome is returned.
pub async fn aggregate_with_cancel(
    query: &str,
    config: &SearchConfig,
    cancel: &CancellationToken,
) -> Result<AggregationOutcome> {
    orchestrator::aggregate::aggregate(query, config, cancel).await
}

/// Aggregate with the default configuration (all six sources).
///
/// # Errors
///
/// Same as [`aggregate`].
pub async fn aggregate_default(query: &str) -> Result<AggregationOutcome> {
    aggregate(query, &SearchConfig::default()).await
}

/// Fetch `url` and return a best-effort plain-text body.
///
/// Returns [`CONTENT_FALLBACK`] when the page has no recognisable content
/// region.
///
/// # Errors
///
/// Returns [`SearchError::Fetch`] if the page cannot be fetched.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> surya_search::Result<()> {
/// let config = surya_search::SearchConfig::default();
/// let text = surya_search::extract_content("https://example.com", &config).await?;
/// println!("{text}");
/// # Ok(())
/// # }
/// ```
pub async fn extract_content(url: &str, config: &SearchConfig) -> Result<String> {
    content::extract_content(url, config).await
}
