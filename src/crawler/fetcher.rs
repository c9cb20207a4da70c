//! Page loader: HTTP fetch plus HTML parse with bounded retries
//!
//! Fetch and parse are retried independently. Each step gets two attempts
//! with a sleep of one timeout interval between them, so a stuck page stalls
//! the crawl for at most roughly two timeouts per step before it is skipped.

use crate::ScoutError;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Attempts per step (fetch, parse) before giving up on a page
pub const LOAD_ATTEMPTS: u32 = 2;

/// Builds the HTTP client used for all requests
///
/// The per-request timeout doubles as the inter-retry sleep in
/// [`PageLoader::load`].
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Turns URLs into parsed documents, owning the retry policy
pub struct PageLoader {
    client: Client,
    timeout: Duration,
}

impl PageLoader {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Loads a URL into a queryable document
    ///
    /// Fetch errors (timeout, DNS, connection refused, non-2xx status) and
    /// parse errors are each retried once after sleeping one timeout
    /// interval. After both attempts of a step fail the page is reported as
    /// `LoadFailed` and the caller skips it.
    pub async fn load(&self, url: &str) -> Result<Html, ScoutError> {
        let body = self.fetch_with_retry(url).await?;
        self.parse_with_retry(&body, url).await
    }

    async fn fetch_with_retry(&self, url: &str) -> Result<String, ScoutError> {
        for attempt in 1..=LOAD_ATTEMPTS {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    tracing::warn!("Fetch attempt {}/{} for {} failed: {}", attempt, LOAD_ATTEMPTS, url, e);
                    if attempt < LOAD_ATTEMPTS {
                        tokio::time::sleep(self.timeout).await;
                    }
                }
            }
        }

        Err(ScoutError::LoadFailed {
            url: url.to_string(),
            attempts: LOAD_ATTEMPTS,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, ScoutError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScoutError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Transport {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| ScoutError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    async fn parse_with_retry(&self, body: &str, url: &str) -> Result<Html, ScoutError> {
        for attempt in 1..=LOAD_ATTEMPTS {
            match parse_document(body, url) {
                Ok(document) => return Ok(document),
                Err(e) => {
                    tracing::warn!("Parse attempt {}/{} for {} failed: {}", attempt, LOAD_ATTEMPTS, url, e);
                    if attempt < LOAD_ATTEMPTS {
                        tokio::time::sleep(self.timeout).await;
                    }
                }
            }
        }

        Err(ScoutError::LoadFailed {
            url: url.to_string(),
            attempts: LOAD_ATTEMPTS,
        })
    }
}

/// Parses fetched bytes into a document tree
///
/// The HTML5 parser recovers from malformed markup, so the observable
/// failure mode is a body with no content at all.
fn parse_document(body: &str, url: &str) -> Result<Html, ScoutError> {
    if body.trim().is_empty() {
        return Err(ScoutError::Parse {
            url: url.to_string(),
            message: "empty document body".to_string(),
        });
    }

    Ok(Html::parse_document(body))
}
