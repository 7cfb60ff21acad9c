//! HTTP transport shared by every rating provider.
//!
//! [`HttpTransport`] executes a single request with a per-attempt timeout and
//! bounded retries:
//!
//! - Connection errors, 5xx and 429 are retried with exponential backoff.
//! - A 429 `Retry-After` header (in seconds) raises the wait, capped by the policy.
//! - Timeouts and other 4xx responses are not retried.
//! - When retries run out on a retryable status, the last response is returned
//!   for the caller to classify.
//!
//! Every await point races the caller's [`CancellationToken`], so a canceled
//! request returns [`Error::Canceled`] promptly.

pub mod retry;
pub mod trace_log;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratingforge_common::{Error, Result};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Request, Response, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::HttpConfig;

pub use retry::RetryPolicy;
pub use trace_log::{setup_logging, TraceEntry, TraceLog};

/// Run `fut` unless `cancel` fires first.
pub async fn cancellable<F, T>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(Error::Canceled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Canceled),
        result = fut => result,
    }
}

/// Timeout-and-retry wrapper around a pooled [`reqwest::Client`].
///
/// Cloning is cheap and clones share the connection pool and trace log.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
    retry: RetryPolicy,
    trace_log: Option<Arc<TraceLog>>,
}

impl HttpTransport {
    /// Create a transport with the given per-attempt timeout and retry budget.
    ///
    /// Backoff delays use the defaults from [`HttpConfig`].
    pub fn new(timeout: Duration, max_retries: u32) -> Result<Self> {
        let retry = RetryPolicy {
            max_retries,
            ..RetryPolicy::default()
        };
        Self::with_policy(timeout, retry)
    }

    pub fn with_policy(timeout: Duration, retry: RetryPolicy) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport_with("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            timeout,
            retry,
            trace_log: None,
        })
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Self::with_policy(config.timeout(), RetryPolicy::from_config(config))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn has_trace_log(&self) -> bool {
        self.trace_log.is_some()
    }

    pub(crate) fn set_trace_log(&mut self, log: Arc<TraceLog>) {
        self.trace_log = Some(log);
    }

    /// Execute `request`, retrying transient failures.
    ///
    /// On success the caller owns the response and its body. Requests whose
    /// body cannot be cloned are attempted exactly once.
    pub async fn execute(&self, cancel: &CancellationToken, request: Request) -> Result<Response> {
        let method = request.method().to_string();
        let path = request.url().path().to_string();

        let attempts = self.attempt_budget(request.try_clone().is_some());

        let mut original = Some(request);
        for attempt in 0..attempts {
            if cancel.is_cancelled() {
                return Err(Error::Canceled);
            }

            let is_last = attempt + 1 == attempts;
            let current = if is_last {
                original.take()
            } else {
                original.as_ref().and_then(Request::try_clone)
            };
            let Some(current) = current else {
                return Err(Error::transport(format!(
                    "{method} {path}: request could not be replayed"
                )));
            };

            let started = Instant::now();
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Canceled),
                outcome = self.client.execute(current) => outcome,
            };
            let elapsed = started.elapsed();

            match outcome {
                Ok(response) => {
                    let status = response.status();
                    self.trace(&method, &path, attempt, Some(status), None, elapsed);

                    if !is_last && is_retryable_status(status) {
                        let wait = self
                            .retry
                            .delay_with_hint(attempt, retry_after(&response));
                        warn!(
                            path = %path,
                            status = status.as_u16(),
                            attempt,
                            wait_ms = wait.as_millis() as u64,
                            "Transient HTTP status, backing off"
                        );
                        drop(response);
                        self.backoff(cancel, wait).await?;
                        continue;
                    }

                    debug!(path = %path, status = status.as_u16(), attempt, "HTTP request completed");
                    return Ok(response);
                }
                Err(e) => {
                    let e = e.without_url();
                    self.trace(&method, &path, attempt, None, Some(e.to_string()), elapsed);

                    if e.is_timeout() {
                        return Err(Error::transport_with(
                            format!("{method} {path} timed out after {:?}", self.timeout),
                            e,
                        ));
                    }

                    if !is_last && is_retryable_error(&e) {
                        let wait = self.retry.delay_for(attempt);
                        warn!(
                            path = %path,
                            attempt,
                            wait_ms = wait.as_millis() as u64,
                            "HTTP connection failed, backing off: {e}"
                        );
                        self.backoff(cancel, wait).await?;
                        continue;
                    }

                    return Err(Error::transport_with(format!("{method} {path} failed"), e));
                }
            }
        }

        Err(Error::transport(format!(
            "{method} {path}: no attempt was made"
        )))
    }

    /// Total attempts for one request: the first try plus retries, or a
    /// single try when the request cannot be replayed.
    fn attempt_budget(&self, replayable: bool) -> u32 {
        if replayable {
            self.retry.max_retries.saturating_add(1)
        } else {
            1
        }
    }

    async fn backoff(&self, cancel: &CancellationToken, wait: Duration) -> Result<()> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Canceled),
            _ = tokio::time::sleep(wait) => Ok(()),
        }
    }

    fn trace(
        &self,
        method: &str,
        path: &str,
        attempt: u32,
        status: Option<StatusCode>,
        error: Option<String>,
        elapsed: Duration,
    ) {
        let Some(log) = &self.trace_log else {
            return;
        };

        log.record(&TraceEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            method,
            path,
            attempt,
            status: status.map(|s| s.as_u16()),
            error,
            elapsed_ms: elapsed.as_millis() as u64,
        });
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn is_retryable_error(error: &reqwest::Error) -> bool {
    error.is_connect() || (error.is_request() && !error.is_builder())
}

fn retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
