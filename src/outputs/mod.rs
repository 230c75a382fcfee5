//! Output generation for the scraped feeds.
//!
//! # Submodules
//!
//! - [`rss`]: Renders articles into RSS 2.0 XML and writes the feed files
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── anthropic-news.xml
//! └── openai-releases.xml
//! ```
//!
//! Each file is rewritten whole on every run; last write wins.

pub mod rss;
