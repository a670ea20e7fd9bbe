//! Cancellable search request — at-most-one-in-flight with supersede
//! semantics.
//!
//! Dispatching cancels any still-outstanding predecessor and tags the new
//! request with a monotonically increasing sequence number; a settled
//! response is discarded unless its sequence is still the latest issued.
//! The sequence check is a safety net independent of whether transport-level
//! cancellation landed in time. Ordering is by dispatch time, not arrival
//! time — a slow earlier response must never overwrite fresher results.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Successful search endpoint response body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPayload {
    /// Pre-rendered results fragment. Absent or null renders as empty.
    #[serde(default)]
    pub html: Option<String>,
}

/// Boxed transport future, keeping [`Transport`] object-safe.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SearchPayload, TransportError>> + Send + 'a>>;

/// Platform seam for issuing the search request. Cancellation happens by
/// dropping the returned future.
pub trait Transport: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> TransportFuture<'a>;
}

/// Transport-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Network failure or unreadable/malformed body.
    Network(String),
    /// Non-success HTTP status.
    Status(u16),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(detail) => write!(f, "network failure: {detail}"),
            TransportError::Status(code) => write!(f, "unexpected status {code}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// Dispatch outcome taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Invalidated by a newer dispatch — expected, never surfaced.
    Superseded,
    /// Network failure or malformed body.
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
}

impl SearchError {
    /// Whether this failure is the expected cancellation of a superseded
    /// request. Callers swallow these instead of reporting them.
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchError::Superseded)
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Superseded => write!(f, "superseded by a newer search"),
            SearchError::Transport(detail) => write!(f, "transport failure: {detail}"),
            SearchError::Status(code) => write!(f, "search endpoint returned status {code}"),
        }
    }
}

impl std::error::Error for SearchError {}

impl From<TransportError> for SearchError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Network(detail) => SearchError::Transport(detail),
            TransportError::Status(code) => SearchError::Status(code),
        }
    }
}

/// Issues search requests under the at-most-one-in-flight supersede rule.
pub struct SearchClient {
    transport: Arc<dyn Transport>,
    latest: AtomicU64,
    inflight: Mutex<Option<CancellationToken>>,
}

impl SearchClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        SearchClient { transport, latest: AtomicU64::new(0), inflight: Mutex::new(None) }
    }

    /// Cancel any outstanding request, then fetch `url`. Returns the
    /// response's `html` field; absent or null becomes the empty string.
    pub async fn dispatch(&self, url: &str) -> Result<String, SearchError> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        if let Some(superseded) = self.inflight.lock().unwrap().replace(token.clone()) {
            superseded.cancel();
        }

        let outcome = tokio::select! {
            _ = token.cancelled() => Err(SearchError::Superseded),
            result = self.transport.fetch(url) => result
                .map(|payload| payload.html.unwrap_or_default())
                .map_err(SearchError::from),
        };

        // Safety net: even if transport cancellation did not land in time,
        // render only while this request is still the latest dispatched.
        if self.latest.load(Ordering::SeqCst) != seq {
            debug!(seq, "search response discarded, superseded");
            return Err(SearchError::Superseded);
        }
        outcome
    }
}

/// reqwest-backed transport. Dropping the in-flight future aborts the
/// underlying request.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport { client: reqwest::Client::new() }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::new()
    }
}

impl Transport for HttpTransport {
    fn fetch<'a>(&'a self, url: &'a str) -> TransportFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|err| TransportError::Network(err.to_string()))?;
            let status = response.status();
            if !status.is_success() {
                return Err(TransportError::Status(status.as_u16()));
            }
            let body = response
                .bytes()
                .await
                .map_err(|err| TransportError::Network(err.to_string()))?;
            serde_json::from_slice(&body).map_err(|err| TransportError::Network(err.to_string()))
        })
    }
}
