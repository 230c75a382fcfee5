//! Per-source article extractors.
//!
//! Each submodule owns one scraped page and exposes a pure
//! `extract_articles()` over the raw page markup, so extraction is testable
//! offline against fixtures. Fetching is the caller's concern.
//!
//! # Supported Sources
//!
//! | Source | Module | Primary strategy | Fallback |
//! |--------|--------|------------------|----------|
//! | Anthropic news | [`anthropic`] | Embedded JSON (`__NEXT_DATA__`, JSON-LD) | `/news/` anchor heuristic |
//! | OpenAI release notes | [`openai`] | Heading hierarchy (h1 dates, h2 entries) | (none) |
//!
//! # Common Patterns
//!
//! - Extraction degrades gracefully: an unrecognizable page yields zero
//!   articles, never an error, and the chosen strategy is logged
//! - Titles and descriptions are translated before an `Article` is returned
//! - Results are deduplicated by link and capped per source

pub mod anthropic;
pub mod openai;

/// Description used when a source exposes no usable summary text.
pub const PLACEHOLDER_DESCRIPTION: &str = "記事の詳細については、リンク先をご確認ください。";
