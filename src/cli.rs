//! Command-line interface definitions for feedsmith.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments have defaults so scheduled runs need no flags; everything
//! can also be set via environment variables.

use crate::models::Source;
use clap::Parser;

/// Which sources one invocation processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceArg {
    Anthropic,
    Openai,
    All,
}

impl SourceArg {
    /// Expand the argument into the concrete source list, in run order.
    pub fn sources(&self) -> Vec<Source> {
        match self {
            SourceArg::Anthropic => vec![Source::Anthropic],
            SourceArg::Openai => vec![Source::Openai],
            SourceArg::All => vec![Source::Anthropic, Source::Openai],
        }
    }
}

/// Command-line arguments for the feedsmith application.
///
/// # Examples
///
/// ```sh
/// # Scrape both sources into ./dist (the scheduled-run invocation)
/// feedsmith
///
/// # One source, custom output directory
/// feedsmith --source openai --output-dir ./public/feeds
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Which source page(s) to scrape
    #[arg(short, long, value_enum, env = "FEEDSMITH_SOURCE", default_value = "all")]
    pub source: SourceArg,

    /// Output directory for the generated feed files
    #[arg(short, long, env = "FEEDSMITH_OUTPUT_DIR", default_value = "dist")]
    pub output_dir: String,
}
