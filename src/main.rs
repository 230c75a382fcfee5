//! # feedsmith
//!
//! Scrapes news and release-note pages that lack native feed support,
//! extracts structured article data, machine-translates titles and summaries
//! to Japanese via keyword substitution, and emits RSS 2.0 XML for feed
//! readers. Runs on a schedule via external automation; each invocation
//! rewrites the static feed files from scratch.
//!
//! ## Sources
//!
//! - Anthropic news: listing page with JSON-embedded article data, with a
//!   DOM anchor heuristic as fallback
//! - OpenAI ChatGPT release notes: nested heading hierarchy (date sections
//!   containing per-release entries)
//!
//! ## Usage
//!
//! ```sh
//! feedsmith --source all --output-dir dist
//! ```
//!
//! ## Pipeline
//!
//! For each selected source:
//! 1. **Fetch**: download the page with retries and backoff
//! 2. **Extract**: structured-data path first, DOM fallback when it yields nothing
//! 3. **Render**: assemble the RSS 2.0 document
//! 4. **Write**: overwrite the source's feed file in the output directory
//!
//! A source that fetches but extracts nothing still produces a valid
//! channel-only feed. A source whose page is unreachable is logged and
//! skipped so the other sources still get their feeds; the process then
//! exits non-zero. Only an unusable output directory aborts up front.

use clap::Parser;
use std::error::Error;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod dates;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod translate;
mod utils;

use cli::Cli;
use fetch::{FetchPage, HttpFetcher, RetryFetch};
use models::{Article, Source};
use outputs::rss;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feedsmith starting up");

    let args = Cli::parse();
    debug!(?args.source, ?args.output_dir, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable before any network work
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = RetryFetch::new(HttpFetcher::new()?, 3, Duration::from_secs(1));
    let result = run_all(&args.source.sources(), &args.output_dir, &fetcher).await;

    let elapsed = start_time.elapsed();
    match &result {
        Ok(total_items) => info!(
            ?elapsed,
            secs = elapsed.as_secs(),
            millis = elapsed.subsec_millis(),
            total_items,
            "Execution complete"
        ),
        Err(e) => error!(?elapsed, error = %e, "Execution finished with failures"),
    }
    result.map(|_| ())
}

/// Run the pipeline for every selected source. Returns the total number of
/// feed items written.
///
/// One source failing does not stop the others: each failure is logged and
/// the remaining sources still run. The run as a whole errors only after
/// every source has had its turn, so a flaky page never blocks the feeds
/// that could be rebuilt.
async fn run_all(
    sources: &[Source],
    output_dir: &str,
    fetcher: &(impl FetchPage + fmt::Debug),
) -> Result<usize, Box<dyn Error>> {
    let mut total_items = 0usize;
    let mut failed: Vec<Source> = Vec::new();

    for &source in sources {
        match run_source(source, output_dir, fetcher).await {
            Ok(count) => total_items += count,
            Err(e) => {
                error!(%source, error = %e, "Source failed; continuing with remaining sources");
                failed.push(source);
            }
        }
    }

    if failed.is_empty() {
        Ok(total_items)
    } else {
        let names: Vec<String> = failed.iter().map(Source::to_string).collect();
        Err(format!("source(s) failed: {}", names.join(", ")).into())
    }
}

/// Run the full pipeline for one source. Returns the number of feed items
/// written.
///
/// Errors out only on unrecoverable setup failures (page unreachable after
/// retries, feed file unwritable); an empty extraction is logged and still
/// produces a channel-only feed.
async fn run_source(
    source: Source,
    output_dir: &str,
    fetcher: &(impl FetchPage + fmt::Debug),
) -> Result<usize, Box<dyn Error>> {
    let page_url = source.page_url();
    info!(%source, %page_url, "Scraping source");

    let html = fetcher.fetch(page_url).await?;

    let articles: Vec<Article> = match source {
        Source::Anthropic => {
            let base = Url::parse(page_url)?;
            scrapers::anthropic::extract_articles(&html, &base, source.article_cap())
        }
        Source::Openai => {
            scrapers::openai::extract_articles(&html, page_url, source.article_cap())
        }
    };

    if articles.is_empty() {
        warn!(%source, "Both extraction paths yielded zero articles; writing channel-only feed");
    }

    let document = rss::render_feed(&source.channel(), &articles)?;
    rss::write_feed(output_dir, source.output_filename(), &document).await?;

    info!(%source, count = articles.len(), file = source.output_filename(), "Feed written");
    Ok(articles.len())
}
