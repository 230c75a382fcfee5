//! Anthropic news listing scraper.
//!
//! The news page at <https://www.anthropic.com/news> renders its listing from
//! machine-readable JSON embedded in the document (`script#__NEXT_DATA__` and
//! JSON-LD blocks), so the primary strategy parses those blobs rather than
//! the visible markup. When the blobs are absent or yield nothing usable, a
//! DOM fallback collects anchors whose href carries a `/news/` path segment.
//!
//! Each strategy runs at most once per invocation; this is a degrade-
//! gracefully chain, not a retry loop.

use crate::dates::{normalize_page_date, now_rfc822};
use crate::models::Article;
use crate::scrapers::PLACEHOLDER_DESCRIPTION;
use crate::translate::translate;
use crate::utils::{clip, collapse_ws, truncate_for_log};
use itertools::Itertools;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Extract articles from the news listing page markup.
///
/// Tries the structured-data path first and falls back to the DOM path when
/// it yields zero records. Returns translated, deduplicated articles in page
/// order, at most `cap` of them. An unrecognizable page yields an empty
/// vector, never an error.
#[instrument(level = "info", skip_all, fields(cap = cap))]
pub fn extract_articles(html: &str, base: &Url, cap: usize) -> Vec<Article> {
    let document = Html::parse_document(html);

    let mut articles = extract_structured(&document, base);
    if articles.is_empty() {
        warn!("Structured-data path yielded no records; trying DOM fallback");
        articles = extract_dom_fallback(&document, base);
        info!(count = articles.len(), path = "dom-fallback", "Extraction complete");
    } else {
        info!(count = articles.len(), path = "structured", "Extraction complete");
    }

    articles
        .into_iter()
        .unique_by(|a| a.link.clone())
        .take(cap)
        .collect()
}

/// Primary path: parse the page's embedded JSON blobs into candidate records.
fn extract_structured(document: &Html, base: &Url) -> Vec<Article> {
    let selector = Selector::parse(
        r#"script[type="application/ld+json"], script#__NEXT_DATA__"#,
    )
    .expect("static selector");

    let mut articles = Vec::new();
    for script in document.select(&selector) {
        let raw = script.text().collect::<String>();
        let json: Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                debug!(
                    error = %e,
                    blob = %truncate_for_log(&raw, 120),
                    "Skipping malformed embedded JSON blob"
                );
                continue;
            }
        };
        collect_article_nodes(&json, base, &mut articles);
    }
    articles
}

/// Recursively walk a JSON value, converting every article-like object.
///
/// The walk handles all the shapes the page has shipped: a bare object, an
/// array, and `@graph` containers, since children are visited regardless of
/// nesting.
fn collect_article_nodes(value: &Value, base: &Url, out: &mut Vec<Article>) {
    match value {
        Value::Object(obj) => {
            if let Some(article) = object_to_article(obj, base) {
                out.push(article);
            }
            for child in obj.values() {
                collect_article_nodes(child, base, out);
            }
        }
        Value::Array(arr) => {
            for child in arr {
                collect_article_nodes(child, base, out);
            }
        }
        _ => {}
    }
}

/// Map one JSON object to an [`Article`] if it looks like an article record.
///
/// A record needs a non-empty title (`headline` or `title`) and a location
/// (`url` or `slug`). When the object declares an `@type`, it must be an
/// article-ish type; untyped objects (the `__NEXT_DATA__` case) are accepted
/// on field shape alone.
fn object_to_article(obj: &serde_json::Map<String, Value>, base: &Url) -> Option<Article> {
    if let Some(typ) = obj.get("@type") {
        if !is_article_type(typ) {
            return None;
        }
    }

    let title = obj
        .get("headline")
        .or_else(|| obj.get("title"))
        .and_then(Value::as_str)
        .map(collapse_ws)
        .filter(|t| !t.is_empty())?;

    let location = obj
        .get("url")
        .or_else(|| obj.get("slug"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    let link = resolve_href(base, location)?;

    let description = obj
        .get("description")
        .or_else(|| obj.get("summary"))
        .or_else(|| obj.get("subtitle"))
        .and_then(Value::as_str)
        .map(collapse_ws)
        .filter(|d| !d.is_empty())
        .map(|d| clip(&d, 200))
        .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string());

    let pub_date = obj
        .get("datePublished")
        .or_else(|| obj.get("publishedOn"))
        .or_else(|| obj.get("date"))
        .and_then(Value::as_str)
        .map(normalize_page_date)
        .unwrap_or_else(now_rfc822);

    Some(Article {
        title: translate(&title),
        link,
        description: translate(&description),
        pub_date,
    })
}

fn is_article_type(typ: &Value) -> bool {
    let matches_name = |s: &str| {
        let s = s.to_lowercase();
        s.contains("article") || s.contains("report")
    };
    match typ {
        Value::String(s) => matches_name(s),
        Value::Array(arr) => arr
            .iter()
            .filter_map(Value::as_str)
            .any(matches_name),
        _ => false,
    }
}

/// Fallback path: anchors whose href contains a news path segment.
///
/// There is no per-article date in the listing markup, so items fall back to
/// the run time, and descriptions use the fixed placeholder.
fn extract_dom_fallback(document: &Html, base: &Url) -> Vec<Article> {
    let selector = Selector::parse("a[href]").expect("static selector");
    let mut articles = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains("/news/") {
            continue;
        }
        let Some(link) = resolve_href(base, href) else {
            continue;
        };
        // the listing page itself is not an article
        if link == base.as_str() {
            continue;
        }

        let title = collapse_ws(&anchor.text().collect::<Vec<_>>().join(" "));
        if title.is_empty() {
            continue;
        }

        articles.push(Article {
            title: translate(&clip(&title, 100)),
            link,
            description: translate(PLACEHOLDER_DESCRIPTION),
            pub_date: now_rfc822(),
        });
    }

    articles
}

/// Resolve a possibly-relative href to an absolute URL string.
fn resolve_href(base: &Url, href: &str) -> Option<String> {
    if let Ok(absolute) = Url::parse(href) {
        return Some(absolute.to_string());
    }
    base.join(href).ok().map(|u| u.to_string())
}
