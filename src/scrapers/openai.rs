//! OpenAI ChatGPT release notes scraper.
//!
//! The release notes page is one long document of nested headings inside a
//! `div.prose` container: each top-level heading (`h1`) carrying a four-digit
//! year opens a date section, and each `h2` inside that section is one
//! release entry. Paragraph and list text following an `h2`, up to the next
//! heading, becomes the entry's summary.
//!
//! The page has no per-entry URLs, so every item links back to the release
//! notes page itself.

use crate::dates::normalize_page_date;
use crate::models::Article;
use crate::scrapers::PLACEHOLDER_DESCRIPTION;
use crate::translate::translate;
use crate::utils::{clip, collapse_ws};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument, warn};

/// Headings without a four-digit year are prose, not date sections.
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").unwrap());

/// Keep descriptions readable in feed readers.
const MAX_DESCRIPTION_CHARS: usize = 300;
const MAX_DESCRIPTION_PARTS: usize = 3;
const MAX_LIST_ITEMS: usize = 2;

/// An `h2` entry being assembled while its trailing text is gathered.
struct PendingEntry {
    date_text: String,
    pub_date: String,
    heading: String,
    parts: Vec<String>,
}

/// Extract release entries from the page markup.
///
/// Walks the heading hierarchy in document order. Entries appearing before
/// any date heading are skipped; an unrecognizable page yields an empty
/// vector, never an error. Returns at most `cap` translated articles in page
/// order (most recent first, as published).
#[instrument(level = "info", skip_all, fields(cap = cap))]
pub fn extract_articles(html: &str, page_url: &str, cap: usize) -> Vec<Article> {
    let document = Html::parse_document(html);
    let content_selector = Selector::parse("h1, h2, p, ul").expect("static selector");
    let prose_selector = Selector::parse("div.prose").expect("static selector");

    // Prefer the prose container; fall back to the whole document when the
    // page structure shifts.
    let nodes: Vec<ElementRef> = match document.select(&prose_selector).next() {
        Some(container) => container.select(&content_selector).collect(),
        None => {
            warn!("No prose container found; scanning whole document");
            document.select(&content_selector).collect()
        }
    };

    let mut articles: Vec<Article> = Vec::new();
    let mut current_date: Option<(String, String)> = None;
    let mut pending: Option<PendingEntry> = None;

    for element in nodes {
        match element.value().name() {
            "h1" => {
                flush(&mut pending, &mut articles, page_url);
                let text = collapse_ws(&element.text().collect::<Vec<_>>().join(" "));
                if YEAR_RE.is_match(&text) {
                    let normalized = normalize_page_date(&text);
                    current_date = Some((text, normalized));
                } else {
                    current_date = None;
                }
            }
            "h2" => {
                flush(&mut pending, &mut articles, page_url);
                let heading = collapse_ws(&element.text().collect::<Vec<_>>().join(" "));
                if heading.is_empty() {
                    continue;
                }
                if let Some((date_text, pub_date)) = &current_date {
                    pending = Some(PendingEntry {
                        date_text: date_text.clone(),
                        pub_date: pub_date.clone(),
                        heading,
                        parts: Vec::new(),
                    });
                }
            }
            "p" => {
                if let Some(entry) = pending.as_mut() {
                    // list paragraphs are captured through their <ul>
                    if has_list_ancestor(&element) {
                        continue;
                    }
                    let text = collapse_ws(&element.text().collect::<Vec<_>>().join(" "));
                    if !text.is_empty() {
                        entry.parts.push(text);
                    }
                }
            }
            "ul" => {
                if let Some(entry) = pending.as_mut() {
                    let li = Selector::parse("li").expect("static selector");
                    for item in element.select(&li).take(MAX_LIST_ITEMS) {
                        let text = collapse_ws(&item.text().collect::<Vec<_>>().join(" "));
                        if !text.is_empty() {
                            entry.parts.push(format!("• {}", text));
                        }
                    }
                }
            }
            _ => {}
        }
    }
    flush(&mut pending, &mut articles, page_url);

    info!(count = articles.len(), "Extracted release entries");
    articles.truncate(cap);
    articles
}

/// Turn a completed entry into an [`Article`].
fn flush(pending: &mut Option<PendingEntry>, articles: &mut Vec<Article>, page_url: &str) {
    let Some(entry) = pending.take() else {
        return;
    };

    let assembled = entry
        .parts
        .iter()
        .take(MAX_DESCRIPTION_PARTS)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    let description = if assembled.is_empty() {
        PLACEHOLDER_DESCRIPTION.to_string()
    } else {
        clip(&assembled, MAX_DESCRIPTION_CHARS)
    };

    articles.push(Article {
        title: translate(&format!("{}: {}", entry.date_text, entry.heading)),
        link: page_url.to_string(),
        description: translate(&description),
        pub_date: entry.pub_date,
    });
}

fn has_list_ancestor(element: &ElementRef) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| matches!(el.value().name(), "ul" | "ol"))
}
