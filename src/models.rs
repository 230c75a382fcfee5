//! Data models for scraped articles and feed channels.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: One extracted news/release entry, ready for feed output
//! - [`Channel`]: RSS channel metadata for a single source
//! - [`Source`]: The fixed set of scraped pages and their per-source constants
//!
//! An [`Article`] is created once per scrape pass and never mutated afterwards;
//! the whole collection is discarded after the feed file is written.

/// A single extracted article, with translated fields and a normalized date.
///
/// # Invariants
///
/// * `link` is a well-formed absolute URL (relative hrefs are resolved during
///   extraction, before an `Article` is constructed)
/// * `title` and `description` are non-empty after translation; extractors
///   substitute a placeholder description rather than leaving it blank
/// * `pub_date` is an RFC-822-style string, e.g. `Tue, 24 Jun 2025 00:00:00 +0000`
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Translated article title.
    pub title: String,
    /// Absolute URL of the article (or of the source page when the source
    /// has no per-article pages, as with release notes).
    pub link: String,
    /// Translated, tag-free plain-text summary.
    pub description: String,
    /// Publication date in RFC-822 form with weekday.
    pub pub_date: String,
}

/// RSS channel metadata for one scraped source.
#[derive(Debug, Clone)]
pub struct Channel {
    /// Feed title shown by readers.
    pub title: &'static str,
    /// Link back to the scraped page.
    pub link: &'static str,
    /// Feed description.
    pub description: &'static str,
    /// RSS `<language>` value. Always `ja`, since the feeds are translated.
    pub language: &'static str,
}

/// The scraped sources and their fixed per-source configuration.
///
/// Each source owns its page URL, channel metadata, output filename, and a
/// cap on how many articles one scrape pass may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Anthropic news listing page (JSON-embedded article data).
    Anthropic,
    /// OpenAI ChatGPT release notes page (nested heading hierarchy).
    Openai,
}

impl Source {
    /// URL of the page this source scrapes.
    pub fn page_url(&self) -> &'static str {
        match self {
            Source::Anthropic => "https://www.anthropic.com/news",
            Source::Openai => "https://help.openai.com/en/articles/6825453-chatgpt-release-notes",
        }
    }

    /// Channel metadata for this source's feed.
    pub fn channel(&self) -> Channel {
        match self {
            Source::Anthropic => Channel {
                title: "Anthropic News",
                link: self.page_url(),
                description: "Anthropic公式サイトのニュースをもとに自動生成された非公式RSSフィードです",
                language: "ja",
            },
            Source::Openai => Channel {
                title: "OpenAI ChatGPT Release Notes",
                link: self.page_url(),
                description: "OpenAI ChatGPTの公式リリースノートをもとに自動生成された非公式RSSフィードです",
                language: "ja",
            },
        }
    }

    /// Filename of the feed document inside the output directory.
    pub fn output_filename(&self) -> &'static str {
        match self {
            Source::Anthropic => "anthropic-news.xml",
            Source::Openai => "openai-releases.xml",
        }
    }

    /// Maximum number of items one scrape pass may emit for this source.
    pub fn article_cap(&self) -> usize {
        match self {
            Source::Anthropic => 10,
            Source::Openai => 20,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Anthropic => write!(f, "anthropic"),
            Source::Openai => write!(f, "openai"),
        }
    }
}
