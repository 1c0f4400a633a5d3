// src/links/fetch.rs
// =============================================================================
// Retrieves the raw HTML of an article.
//
// The search never talks to reqwest directly. It goes through the
// PageFetcher trait, so tests can swap the network for an in-memory graph.
//
// HttpFetcher is the real implementation:
// - One GET per call, with a timeout and a User-Agent header
// - Transient failures (timeouts, connection errors, HTTP 429 and 5xx) are
//   retried with exponential backoff: 250ms, 500ms, 1s, ...
// - Anything else (404, 403, a redirect loop, ...) fails at once
//
// A retry happens inside a single fetch call, so the search loop never sees
// it and the BFS order is unaffected.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::error::{Result, SearchError};
use crate::graph::DocumentId;

// Anything that can turn a DocumentId into the HTML of that page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, id: &DocumentId) -> Result<String>;
}

// Settings for the HTTP client
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// Extra attempts after a transient failure (0 = fail on the first one)
    pub retries: u32,
    /// Delay before the first retry; doubled for every retry after that
    pub backoff: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retries: 2,
            backoff: Duration::from_millis(250),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct HttpFetcher {
    client: Client,
    retries: u32,
    backoff: Duration,
}

// Result of a single GET
enum Attempt {
    Page(String),
    Transient(String),
    Permanent(String),
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| SearchError::Client {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            retries: config.retries,
            backoff: config.backoff,
        })
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let reason = describe_error(&e);
                return if is_transient_error(&e) {
                    Attempt::Transient(reason)
                } else {
                    Attempt::Permanent(reason)
                };
            }
        };

        let status = response.status();
        if status.is_success() {
            // A body cut off mid-stream is worth another try
            match response.text().await {
                Ok(html) => Attempt::Page(html),
                Err(e) => Attempt::Transient(describe_error(&e)),
            }
        } else if is_transient_status(status) {
            Attempt::Transient(format!("HTTP {}", status))
        } else {
            Attempt::Permanent(format!("HTTP {}", status))
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, id: &DocumentId) -> Result<String> {
        let url = id.as_str();
        let mut retry = 0;

        loop {
            match self.attempt(url).await {
                Attempt::Page(html) => {
                    debug!(url, bytes = html.len(), "fetched page");
                    return Ok(html);
                }
                Attempt::Transient(reason) if retry < self.retries => {
                    let delay = backoff_delay(self.backoff, retry);
                    warn!(url, %reason, retry = retry + 1, ?delay, "transient fetch failure, retrying");
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Attempt::Transient(reason) => {
                    return Err(SearchError::Fetch {
                        url: url.to_string(),
                        reason: format!("{} (gave up after {} attempts)", reason, retry + 1),
                    });
                }
                Attempt::Permanent(reason) => {
                    return Err(SearchError::Fetch {
                        url: url.to_string(),
                        reason,
                    });
                }
            }
        }
    }
}

// Delay before retry number `retry` (0-based): base * 2^retry
fn backoff_delay(base: Duration, retry: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(retry))
}

// Server-side trouble that may clear up on its own
fn is_transient_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn is_transient_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect() || error.is_body()
}

// Turns a reqwest error into a short human-readable reason
fn describe_error(error: &reqwest::Error) -> String {
    let error_string = error.to_string();

    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            format!("connection failed: {}", error_string)
        }
    } else {
        error_string
    }
}
