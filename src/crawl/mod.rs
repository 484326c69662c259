// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a URL
// - Same-site restriction (exact host and port of the start URL)
// - Configurable depth limit
// - Content-hash deduplication so mirrored pages are saved once
//
// Submodules:
// - frontier: the FIFO queue of (url, depth) pairs
// - dedup: hashes of page text we have already seen
// - outcome: per-page results and the final report
// - crawler: the loop tying it all together
// =============================================================================

mod crawler;
mod dedup;
mod frontier;
mod outcome;

// Re-export the crawler and what it reports
pub use crawler::Crawler;
pub use outcome::{CrawlReport, PageOutcome};
