// src/extract/mod.rs
// =============================================================================
// Everything we pull out of a rendered HTML page.
//
// Submodules:
// - text: the human-visible text of a page, plus blank-line normalization
// - links: every <a href> on a page, resolved to an absolute URL
// =============================================================================

mod links;
mod text;

pub use links::extract_links;
pub use text::{extract_text, normalize};
