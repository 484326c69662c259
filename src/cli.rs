// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{DEFAULT_MAX_DEPTH, DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_TIMEOUT_SECS};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "site-scribe",
    version = "0.1.0",
    about = "Crawl one website and save the text of every unique page",
    long_about = "site-scribe loads pages in a real browser, follows links that stay on the \
                  start URL's host, and writes one .txt file per page with distinct content."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com)
    pub start_url: String,

    /// Directory the .txt files are written to
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Maximum crawl depth
    ///
    /// Depth 0 = just the starting page
    /// Depth 1 = starting page + all pages it links to
    /// etc.
    #[arg(long, short = 'd', default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// How pages are loaded
    #[arg(long, value_enum, default_value_t = FetcherKind::Browser)]
    pub fetcher: FetcherKind,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Seconds a page gets to load before it counts as failed
    #[arg(long, default_value_t = DEFAULT_PAGE_TIMEOUT_SECS)]
    pub page_timeout: u64,

    /// Print the crawl report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetcherKind {
    /// Headless Chrome; JavaScript runs before text is extracted
    Browser,
    /// Plain HTTP GET; no JavaScript
    Http,
}
