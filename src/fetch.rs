//! Page fetching with exponential backoff retry logic.
//!
//! Both source pages sit behind aggressive CDNs, so transient failures and
//! bot checks are routine. This module provides a robust fetch interface:
//!
//! - [`FetchPage`]: Core trait defining an async page fetch
//! - [`HttpFetcher`]: `reqwest`-backed implementation with browser-like headers
//! - [`RetryFetch`]: Decorator that adds retry logic to any `FetchPage` implementation
//!
//! # Retry Strategy
//!
//! - Maximum 3 retry attempts
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use rand::{Rng, rng};
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Trait for async page retrieval.
///
/// Implementors fetch a URL and return its body as text. The abstraction
/// exists so decorators (like retry logic) and test doubles can stand in for
/// the real HTTP client.
pub trait FetchPage {
    /// Fetch `url` and return the response body.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// `reqwest`-backed page fetcher.
///
/// Sends a browser-like header set; the source pages serve an interstitial
/// to clients that look like scripts. A response whose body is a bot-block
/// page ("Something went wrong" / "Access denied") counts as a failure so
/// the retry layer gets a chance to recover.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(30))
            .build()?;
        Ok(HttpFetcher { client })
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher").finish()
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_UA)
            .header(
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let dt = t0.elapsed();

        if looks_blocked(&body) {
            warn!(
                elapsed_ms = dt.as_millis() as u128,
                bytes = body.len(),
                "Response body is a bot-block page"
            );
            return Err("page responded with a bot-block interstitial".into());
        }

        info!(
            elapsed_ms = dt.as_millis() as u128,
            bytes = body.len(),
            "Fetched page"
        );
        Ok(body)
    }
}

/// Detect the sources' bot-block interstitials. Real pages can legitimately
/// mention these phrases inside article text, so the check also requires the
/// body to be implausibly small for a content page.
fn looks_blocked(body: &str) -> bool {
    (body.contains("Something went wrong") || body.contains("Access denied"))
        && body.len() < 20_000
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchPage`]
/// implementation.
///
/// The delay between retries follows:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchPage,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchPage for RetryFetch<T>
where
    T: FetchPage + fmt::Debug,
{
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(url).await {
                Ok(body) => {
                    return Ok(body);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}
