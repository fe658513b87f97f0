//! Core coordinator: concurrent multi-source fan-out, fixed-order fan-in.
//!
//! Every source runs on its own spawned task, so total latency is the
//! slowest source rather than the sum. The coordinator waits for every task
//! to finish (or fail) and then reassembles outputs in configuration order.

use std::sync::Arc;

use chrono::Local;
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

use crate::config::SearchConfig;
use crate::engine::SourceAdapter;
use crate::engines::ScrapeAdapter;
use crate::error::SearchError;
use crate::http;
use crate::types::{AggregationOutcome, SourceFailure};

use super::merge::{self, SourceOutcome};

/// Aggregate `query` across every source in `config`.
///
/// # Pipeline
///
/// 1. Validate config and build one shared HTTP client
/// 2. Build one [`ScrapeAdapter`] per configured source
/// 3. Hand off to [`fan_out`]
///
/// # Errors
///
/// - [`SearchError::Config`] / [`SearchError::Coordination`] if nothing
///   could be dispatched
/// - [`SearchError::Cancelled`] if `cancel` fires before all sources finish
///
/// Per-source failures never surface here; they are in
/// [`AggregationOutcome::failures`].
pub async fn aggregate(
    query: &str,
    config: &SearchConfig,
    cancel: &CancellationToken,
) -> Result<AggregationOutcome, SearchError> {
    config.validate()?;
    let client = http::build_client(config)?;

    let adapters: Vec<Arc<ScrapeAdapter>> = config
        .sources
        .iter()
        .map(|&source| Arc::new(ScrapeAdapter::for_source(source, client.clone(), config)))
        .collect();

    fan_out(query, adapters, cancel).await
}

/// Run every adapter concurrently and merge their outcomes.
///
/// Results are concatenated in the order of `adapters`, independent of
/// completion order. A panicking adapter is recorded as an aborted source,
/// like any other per-source failure.
///
/// # Errors
///
/// - [`SearchError::Coordination`] if called outside a tokio runtime
/// - [`SearchError::Cancelled`] if `cancel` fires first; every in-flight
///   task is aborted and no partial outcome is returned
pub async fn fan_out<A: SourceAdapter>(
    query: &str,
    adapters: Vec<Arc<A>>,
    cancel: &CancellationToken,
) -> Result<AggregationOutcome, SearchError> {
    if cancel.is_cancelled() {
        return Err(SearchError::Cancelled);
    }

    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| SearchError::Coordination(format!("no async runtime available: {e}")))?;

    tracing::trace!(query, sources = adapters.len(), "aggregation started");
    let fetched_at = Local::now();
    let shared_query: Arc<str> = Arc::from(query);

    let mut sources = Vec::with_capacity(adapters.len());
    let mut handles = Vec::with_capacity(adapters.len());
    for adapter in adapters {
        sources.push(adapter.source());
        let q = Arc::clone(&shared_query);
        handles.push(runtime.spawn(async move { adapter.fetch(&q).await }));
    }

    // Aborts every task if we return early or the caller drops this future.
    let _guard = AbortOnDrop(handles.iter().map(|h| h.abort_handle()).collect());

    let joined = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            tracing::debug!("aggregation cancelled");
            return Err(SearchError::Cancelled);
        }
        joined = futures::future::join_all(handles) => joined,
    };

    let outcomes: Vec<SourceOutcome> = sources
        .into_iter()
        .zip(joined)
        .map(|(source, joined)| {
            let outcome = match joined {
                Ok(result) => result.map_err(SourceFailure::from),
                Err(e) => Err(SourceFailure::aborted(format!(
                    "{source} task ended unexpectedly: {e}"
                ))),
            };
            (source, outcome)
        })
        .collect();

    Ok(merge::assemble(query, fetched_at, outcomes))
}

struct AbortOnDrop(Vec<AbortHandle>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FailureKind, ResultRecord, SourceId};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    #[derive(Clone, Copy)]
    enum Behaviour {
        Records(usize),
        Fail,
        Panic,
    }

    /// A source that answers after a fixed delay with a scripted outcome.
    struct ScriptedSource {
        source: SourceId,
        delay: Duration,
        behaviour: Behaviour,
        finished: Arc<AtomicBool>,
    }

    impl ScriptedSource {
        fn new(source: SourceId, delay_ms: u64, behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                source,
                delay: Duration::from_millis(delay_ms),
                behaviour,
                finished: Arc::new(AtomicBool::new(false)),
            })
        }
    }

    impl SourceAdapter for ScriptedSource {
        async fn fetch(&self, query: &str) -> Result<Vec<ResultRecord>, SearchError> {
            tokio::time::sleep(self.delay).await;
            self.finished.store(true, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Records(n) => Ok((0..n)
                    .map(|i| ResultRecord {
                        title: format!("{query} {i}"),
                        url: format!("https://{}.example/{i}", self.source.id()),
                        description: format!("from {}", self.source),
                        source: self.source,
                    })
                    .collect()),
                Behaviour::Fail => Err(SearchError::Fetch("HTTP 503 Service Unavailable".into())),
                Behaviour::Panic => panic!("scripted adapter panic"),
            }
        }

        fn source(&self) -> SourceId {
            self.source
        }
    }

    fn urls(outcome: &AggregationOutcome) -> Vec<String> {
        outcome.results.iter().map(|r| r.url.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn order_follows_configuration_not_completion() {
        let cancel = CancellationToken::new();

        let slow_first = vec![
            ScriptedSource::new(SourceId::Google, 300, Behaviour::Records(2)),
            ScriptedSource::new(SourceId::Bing, 10, Behaviour::Records(2)),
            ScriptedSource::new(SourceId::DuckDuckGo, 100, Behaviour::Records(1)),
        ];
        let fast_first = vec![
            ScriptedSource::new(SourceId::Google, 10, Behaviour::Records(2)),
            ScriptedSource::new(SourceId::Bing, 300, Behaviour::Records(2)),
            ScriptedSource::new(SourceId::DuckDuckGo, 100, Behaviour::Records(1)),
        ];

        let a = fan_out("q", slow_first, &cancel).await.expect("outcome");
        let b = fan_out("q", fast_first, &cancel).await.expect("outcome");

        assert_eq!(urls(&a), urls(&b));
        assert_eq!(
            urls(&a),
            [
                "https://google.example/0",
                "https://google.example/1",
                "https://bing.example/0",
                "https://bing.example/1",
                "https://duckduckgo.example/0",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn sources_run_concurrently() {
        let cancel = CancellationToken::new();
        let adapters = vec![
            ScriptedSource::new(SourceId::Google, 1_000, Behaviour::Records(1)),
            ScriptedSource::new(SourceId::Bing, 1_000, Behaviour::Records(1)),
            ScriptedSource::new(SourceId::Yep, 1_000, Behaviour::Records(1)),
        ];
        let started = tokio::time::Instant::now();
        let outcome = fan_out("q", adapters, &cancel).await.expect("outcome");
        assert_eq!(outcome.results.len(), 3);
        assert!(started.elapsed() < Duration::from_millis(1_500));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_source_does_not_affect_others() {
        let cancel = CancellationToken::new();
        let healthy = || {
            vec![
                ScriptedSource::new(SourceId::Google, 50, Behaviour::Records(3)),
                ScriptedSource::new(SourceId::You, 20, Behaviour::Records(2)),
            ]
        };
        let baseline = fan_out("q", healthy(), &cancel).await.expect("outcome");

        let mut with_failure = healthy();
        with_failure.insert(1, ScriptedSource::new(SourceId::Bing, 5, Behaviour::Fail));
        let degraded = fan_out("q", with_failure, &cancel).await.expect("outcome");

        assert_eq!(urls(&baseline), urls(&degraded));
        assert_eq!(degraded.failures.len(), 1);
        assert_eq!(degraded.failures[&SourceId::Bing].kind, FailureKind::Fetch);
    }

    #[tokio::test(start_paused = true)]
    async fn rust_ownership_example() {
        let cancel = CancellationToken::new();
        let adapters = vec![
            ScriptedSource::new(SourceId::Google, 30, Behaviour::Records(2)),
            ScriptedSource::new(SourceId::Bing, 10, Behaviour::Fail),
        ];
        let outcome = fan_out("rust ownership", adapters, &cancel)
            .await
            .expect("outcome");

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].title, "rust ownership 0");
        assert_eq!(outcome.results[1].title, "rust ownership 1");
        assert!(outcome.results.iter().all(|r| r.source == SourceId::Google));
        assert_eq!(outcome.failures.keys().collect::<Vec<_>>(), [&SourceId::Bing]);
        assert!(outcome.web_info.contains("'rust ownership'"));
    }

    #[tokio::test(start_paused = true)]
    async fn every_source_failing_still_returns_outcome() {
        let cancel = CancellationToken::new();
        let adapters = vec![
            ScriptedSource::new(SourceId::Google, 5, Behaviour::Fail),
            ScriptedSource::new(SourceId::Bing, 5, Behaviour::Fail),
        ];
        let outcome = fan_out("q", adapters, &cancel).await.expect("outcome");
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.failures.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_source_is_isolated() {
        let cancel = CancellationToken::new();
        let adapters = vec![
            ScriptedSource::new(SourceId::Google, 5, Behaviour::Panic),
            ScriptedSource::new(SourceId::Bing, 5, Behaviour::Records(2)),
        ];
        let outcome = fan_out("q", adapters, &cancel).await.expect("outcome");
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.failures[&SourceId::Google].kind, FailureKind::Aborted);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_before_completion_aborts_sources() {
        let cancel = CancellationToken::new();
        let slow = ScriptedSource::new(SourceId::Google, 5_000, Behaviour::Records(1));
        let finished = Arc::clone(&slow.finished);

        let task_cancel = cancel.clone();
        let task = tokio::spawn(async move { fan_out("q", vec![slow], &task_cancel).await });

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
        let result = task.await.expect("join");
        assert_eq!(result.unwrap_err(), SearchError::Cancelled);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!finished.load(Ordering::SeqCst), "source kept running after cancel");
    }

    #[tokio::test]
    async fn already_cancelled_token_fails_fast() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let adapters = vec![ScriptedSource::new(SourceId::Google, 0, Behaviour::Records(1))];
        let err = fan_out("q", adapters, &cancel).await.unwrap_err();
        assert_eq!(err, SearchError::Cancelled);
    }

    #[test]
    fn outside_runtime_is_coordination_failure() {
        let cancel = CancellationToken::new();
        let adapters = vec![ScriptedSource::new(SourceId::Google, 0, Behaviour::Records(1))];
        let err = futures::executor::block_on(fan_out("q", adapters, &cancel)).unwrap_err();
        assert!(matches!(err, SearchError::Coordination(_)));
    }

    #[tokio::test]
    async fn invalid_config_rejected_before_dispatch() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = aggregate("q", &config, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
