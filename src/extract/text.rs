// src/extract/text.rs
// =============================================================================
// Turns rendered HTML into the text a reader would see.
//
// We walk every text node in the parsed document and concatenate them in
// document order, leaving out anything inside elements the browser never
// shows (scripts, styles, ...). Whitespace is kept as-is, which is why
// normalize() exists: markup-heavy pages produce long runs of blank lines.
// =============================================================================

use regex::Regex;
use scraper::{Html, Node};
use std::sync::OnceLock;

// Elements whose text content is never displayed
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extracts the visible text of an HTML document.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()))
        });

        if !hidden {
            text.push_str(chunk);
        }
    }

    text
}

fn blank_run() -> &'static Regex {
    static BLANK_RUN: OnceLock<Regex> = OnceLock::new();
    BLANK_RUN.get_or_init(|| Regex::new(r"\n{4,}").expect("blank-line pattern is valid"))
}

/// Collapses every run of 4 or more newlines to exactly 3.
///
/// Idempotent: the output never contains a run longer than 3, so a second
/// pass finds nothing to replace.
pub fn normalize(text: &str) -> String {
    blank_run().replace_all(text, "\n\n\n").into_owned()
}
