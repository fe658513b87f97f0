//! Trait definition for pluggable search sources.
//!
//! The built-in backends all share one implementation,
//! [`crate::engines::ScrapeAdapter`], driven by a per-backend descriptor.
//! The trait exists so the aggregator can fan out over anything that
//! produces [`ResultRecord`]s, including test doubles.

use crate::error::SearchError;
use crate::types::{ResultRecord, SourceId};

/// A pluggable search source.
///
/// One call to [`fetch`](SourceAdapter::fetch) performs exactly one outbound
/// request and never retries. Implementations must:
///
/// - URL-escape the query into their request
/// - return [`SearchError::Fetch`] for network, timeout, or status failures
/// - return [`SearchError::Parse`] only when the body is not markup at all
/// - silently skip candidates missing a title, link, or description
///
/// All implementations must be `Send + Sync + 'static` since each fetch
/// runs on its own spawned task.
pub trait SourceAdapter: Send + Sync + 'static {
    /// Fetch and parse results for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request fails or the response is not
    /// a markup document. An empty vector is a normal outcome.
    fn fetch(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ResultRecord>, SearchError>> + Send;

    /// Which [`SourceId`] this adapter reports as.
    fn source(&self) -> SourceId;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A mock source for testing trait bounds and async execution.
    struct MockSource {
        source: SourceId,
        results: Vec<ResultRecord>,
    }

    impl MockSource {
        fn new(source: SourceId, results: Vec<ResultRecord>) -> Self {
            Self { source, results }
        }

        fn failing(source: SourceId) -> Self {
            Self {
                source,
                results: vec![],
            }
        }
    }

    impl SourceAdapter for MockSource {
        async fn fetch(&self, _query: &str) -> Result<Vec<ResultRecord>, SearchError> {
            if self.results.is_empty() {
                return Err(SearchError::Fetch("mock source failure".into()));
            }
            Ok(self.results.clone())
        }

        fn source(&self) -> SourceId {
            self.source
        }
    }

    #[test]
    fn mock_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockSource>();
    }

    #[tokio::test]
    async fn mock_source_returns_results() {
        let record = ResultRecord {
            title: "Test".into(),
            url: "https://test.com".into(),
            description: "A test result".into(),
            source: SourceId::DuckDuckGo,
        };
        let source = MockSource::new(SourceId::DuckDuckGo, vec![record]);

        let results = source.fetch("test").await.expect("should succeed");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Test");
    }

    #[tokio::test]
    async fn mock_source_propagates_errors() {
        let source = MockSource::failing(SourceId::Google);
        let err = source.fetch("test").await.unwrap_err();
        assert!(err.to_string().contains("mock source failure"));
        assert!(err.is_source_failure());
    }

    #[test]
    fn source_returns_correct_variant() {
        let source = MockSource::new(SourceId::Yep, vec![]);
        assert_eq!(source.source(), SourceId::Yep);
    }
}
