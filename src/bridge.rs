//! Off-thread execution of searches for hosts that must not block.
//!
//! [`SearchBridge`] owns a dedicated multi-thread tokio runtime. Each
//! [`submit`](SearchBridge::submit) or
//! [`fetch_content`](SearchBridge::fetch_content) call spawns one job on it
//! and returns a [`Pending`] handle that delivers exactly one result over a
//! oneshot channel. The caller decides how to wait:
//!
//! - [`Pending::try_take`] polls without blocking (UI frame loops)
//! - [`Pending::wait`] blocks the calling thread
//! - `.await` (or [`Pending::recv`]) from any async runtime
//!
//! Dropping a handle before it resolves cancels the job.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::Arc;

use surya_search::{AggregationOutcome, SearchConfig, SearchError};
use tokio::runtime::{Handle, Runtime};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio_util::sync::CancellationToken;

/// Worker threads for the bridge runtime. Fetches are I/O bound.
const WORKER_THREADS: usize = 2;

const LOST_WORKER: &str = "search worker stopped without delivering a result";

/// Host-side executor for searches and content fetches.
pub struct SearchBridge {
    /// `None` only while dropping.
    runtime: Option<Runtime>,
    handle: Handle,
    config: Arc<SearchConfig>,
}

impl SearchBridge {
    /// Start a bridge with its own runtime.
    ///
    /// The config is not validated here; an unusable config surfaces as a
    /// [`SearchError::Config`] from the first pending handle.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Coordination`] if the runtime cannot be built.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(WORKER_THREADS)
            .thread_name("surya-search")
            .enable_all()
            .build()
            .map_err(|e| SearchError::Coordination(format!("failed to start search runtime: {e}")))?;
        let handle = runtime.handle().clone();

        tracing::debug!(
            sources = config.sources.len(),
            timeout_seconds = config.timeout_seconds,
            "search bridge started"
        );

        Ok(Self {
            runtime: Some(runtime),
            handle,
            config: Arc::new(config),
        })
    }

    /// The configuration every job on this bridge uses.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run an aggregation for `query` off the calling thread.
    pub fn submit(&self, query: impl Into<String>) -> PendingSearch {
        let query = query.into();
        tracing::trace!(query = %query, "search submitted");
        self.spawn_pending(move |config, cancel| async move {
            surya_search::aggregate_with_cancel(&query, &config, &cancel).await
        })
    }

    /// Fetch `url` and extract its content off the calling thread.
    pub fn fetch_content(&self, url: impl Into<String>) -> PendingContent {
        let url = url.into();
        tracing::trace!(url = %url, "content fetch submitted");
        self.spawn_pending(move |config, cancel| async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => Err(SearchError::Cancelled),
                result = surya_search::extract_content(&url, &config) => result,
            }
        })
    }

    fn spawn_pending<T, F, Fut>(&self, job: F) -> Pending<T>
    where
        T: Send + 'static,
        F: FnOnce(Arc<SearchConfig>, CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, SearchError>> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        let work = job(Arc::clone(&self.config), cancel.clone());

        // A panic or runtime shutdown drops `tx`; the handle reports that as
        // a coordination failure.
        self.handle.spawn(async move {
            let result = work.await;
            if tx.send(result).is_err() {
                tracing::debug!("pending handle dropped before result was delivered");
            }
        });

        Pending {
            rx,
            cancel,
            delivered: false,
        }
    }
}

impl Drop for SearchBridge {
    fn drop(&mut self) {
        // Safe to drop from inside another runtime's async context.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl std::fmt::Debug for SearchBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBridge")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Handle to an in-flight search.
pub type PendingSearch = Pending<AggregationOutcome>;

/// Handle to an in-flight content fetch.
pub type PendingContent = Pending<String>;

/// One result that will arrive from a bridge job.
#[must_use = "dropping a pending handle cancels its job"]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T, SearchError>>,
    cancel: CancellationToken,
    delivered: bool,
}

impl<T> Pending<T> {
    /// Abandon the job. It resolves to [`SearchError::Cancelled`] unless it
    /// already finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A token that cancels this job when fired, e.g. from a signal handler.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Take the result if it has arrived.
    ///
    /// Returns `None` while the job is still running, and after the result
    /// has already been taken.
    pub fn try_take(&mut self) -> Option<Result<T, SearchError>> {
        if self.delivered {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.delivered = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.delivered = true;
                Some(Err(SearchError::Coordination(LOST_WORKER.into())))
            }
        }
    }

    /// Block the calling thread until the result arrives.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context; use
    /// `.await` there instead.
    pub fn wait(mut self) -> Result<T, SearchError> {
        if self.delivered {
            return Err(SearchError::Coordination("result already taken".into()));
        }
        let (_, placeholder) = oneshot::channel();
        std::mem::replace(&mut self.rx, placeholder)
            .blocking_recv()
            .unwrap_or_else(|_| Err(SearchError::Coordination(LOST_WORKER.into())))
    }

    /// Wait asynchronously for the result. Works from any runtime.
    pub async fn recv(mut self) -> Result<T, SearchError> {
        if self.delivered {
            return Err(SearchError::Coordination("result already taken".into()));
        }
        (&mut self.rx)
            .await
            .unwrap_or_else(|_| Err(SearchError::Coordination(LOST_WORKER.into())))
    }
}

impl<T: Send + 'static> IntoFuture for Pending<T> {
    type Output = Result<T, SearchError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.recv())
    }
}

impl<T> Drop for Pending<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<T> std::fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pending")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("delivered", &self.delivered)
            .finish()
    }
}
