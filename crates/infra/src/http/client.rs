//! Shared HTTP transport for the Graph, token and summarizer endpoints.
//!
//! Whether a failed call is sent again depends on its [`Replay`] class:
//! - [`Replay::Safe`] requests (every method but `POST`, or a `POST` marked
//!   through [`HttpClient::send_replayable`]) are retried after timeouts,
//!   refused connections, `429` and `5xx`;
//! - [`Replay::OnlyUnprocessed`] requests (`POST` that creates something) are
//!   retried only when the provider provably did not act on them: a refused
//!   connection or a `429` throttle.
//!
//! A `Retry-After` header (in seconds) on a retryable response replaces the
//! exponential backoff. A wait longer than the configured cap ends the retry
//! loop and hands the throttled response back to the caller.

use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{Client as ReqwestClient, Method, Request, RequestBuilder, Response, StatusCode};
use reviewbot_domain::{GraphConfig, ReviewBotError};
use tracing::{debug, warn};

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("reviewbot/", env!("CARGO_PKG_VERSION"));

/// Whether a request may be sent again after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replay {
    /// Sending the request twice has the same effect as sending it once.
    Safe,
    /// Sending the request twice may duplicate what it creates.
    OnlyUnprocessed,
}

impl Replay {
    pub fn for_method(method: &Method) -> Self {
        if *method == Method::POST {
            Self::OnlyUnprocessed
        } else {
            Self::Safe
        }
    }

    fn retries_status(self, status: StatusCode) -> bool {
        match self {
            Self::Safe => status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error(),
            Self::OnlyUnprocessed => status == StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn retries_error(self, err: &reqwest::Error) -> bool {
        match self {
            Self::Safe => err.is_timeout() || err.is_connect(),
            Self::OnlyUnprocessed => err.is_connect() && !err.is_timeout(),
        }
    }
}

/// HTTP client with replay-aware retries and a per-request timeout.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
    max_retry_after: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client tuned with the provider's timeout and attempt settings.
    pub fn for_graph(config: &GraphConfig) -> Result<Self, ReviewBotError> {
        Self::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .max_attempts(config.max_attempts)
            .build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send a request, retrying according to the replay class of its method.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ReviewBotError> {
        let request = builder.build().map_err(into_domain)?;
        let replay = Replay::for_method(request.method());
        self.execute(request, replay).await
    }

    /// Send a request that is safe to repeat whatever its method, such as a
    /// token exchange or a completion call.
    pub async fn send_replayable(
        &self,
        builder: RequestBuilder,
    ) -> Result<Response, ReviewBotError> {
        let request = builder.build().map_err(into_domain)?;
        self.execute(request, Replay::Safe).await
    }

    async fn execute(&self, request: Request, replay: Replay) -> Result<Response, ReviewBotError> {
        let method = request.method().clone();
        let url = request.url().clone();
        let mut attempt = 1;

        loop {
            let Some(current) = request.try_clone() else {
                debug!(%method, %url, "request body cannot be replayed, sending once");
                return self.client.execute(request).await.map_err(into_domain);
            };
            let retries_left = attempt < self.max_attempts;

            debug!(attempt, %method, %url, "sending HTTP request");
            let delay = match self.client.execute(current).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "received HTTP response");

                    if !retries_left || !replay.retries_status(status) {
                        return Ok(response);
                    }
                    match retry_after(&response) {
                        Some(wait) if wait > self.max_retry_after => {
                            warn!(
                                %url,
                                retry_after_secs = wait.as_secs(),
                                "provider asked for a longer wait than allowed, giving up"
                            );
                            return Ok(response);
                        }
                        Some(wait) => wait,
                        None => self.backoff_delay(attempt),
                    }
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "HTTP request failed");

                    if !retries_left || !replay.retries_error(&err) {
                        return Err(into_domain(err));
                    }
                    self.backoff_delay(attempt)
                }
            };

            warn!(attempt, %method, %url, delay_ms = delay.as_millis() as u64, "retrying request");
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }

    fn backoff_delay(&self, attempt: usize) -> Duration {
        let shift = attempt.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    max_retry_after: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            max_retry_after: Duration::from_secs(30),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Longest `Retry-After` the client is willing to sleep through.
    pub fn max_retry_after(mut self, wait: Duration) -> Self {
        self.max_retry_after = wait;
        self
    }

    pub fn build(self) -> Result<HttpClient, ReviewBotError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .no_proxy()
            .build()
            .map_err(into_domain)?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
            max_retry_after: self.max_retry_after,
        })
    }
}

/// Delay requested by the provider, in whole seconds.
fn retry_after(response: &Response) -> Option<Duration> {
    let value = response.headers().get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

fn into_domain(err: reqwest::Error) -> ReviewBotError {
    InfraError::from(err).into()
}
