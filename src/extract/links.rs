// src/extract/links.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
//
// We also use the `url` crate to resolve relative links against the page URL.
//
// Only <a href="..."> elements count. Deciding which links the crawler
// actually follows (same site, not yet visited) happens in the crawl module.
// =============================================================================

use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

fn anchor_selector() -> &'static Selector {
    static ANCHORS: OnceLock<Selector> = OnceLock::new();
    ANCHORS.get_or_init(|| Selector::parse("a[href]").expect("a[href] is a valid selector"))
}

// Extracts all links from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL of the page (for resolving relative links)
//
// Returns: absolute URLs in document order. Hrefs that cannot be resolved
// are dropped; duplicates are kept (the crawler's visited set handles them).
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    document
        .select(anchor_selector())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| base_url.join(href.trim()).ok())
        .collect()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why base_url.join() for every href?
//    - join() handles both cases: absolute hrefs replace the base entirely,
//      relative ones ("../other", "/docs", "page2") are resolved like a
//      browser would
//
// 2. Why keep mailto:/javascript: links?
//    - They resolve to valid URLs, so we return them; the same-domain check
//      rejects anything that is not http(s) later on
// -----------------------------------------------------------------------------
