// src/classify.rs
// =============================================================================
// Cheap yes/no questions the crawler asks about a URL before doing any work.
//
// - Is this link part of the site we are crawling?
// - Is this URL worth handing to the browser at all (or is it an image)?
// - Should a page with this filename be kept off disk?
//
// None of these touch the network; they only look at the URL text.
// =============================================================================

use url::{Position, Url};

// Returns the network location of a URL: [user[:pass]@]host[:port]
//
// The url crate already drops default ports (https://a.com:443 -> a.com),
// so two spellings of the same origin compare equal.
fn netloc(url: &Url) -> &str {
    &url[Position::BeforeUsername..Position::AfterPort]
}

/// True if `url` is http(s) and has exactly the same network location as
/// `start`. Path, query and fragment are ignored.
pub fn is_same_domain(url: &Url, start: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && netloc(url) == netloc(start)
}

/// False if the URL path ends in one of the skipped extensions
/// (case-insensitive). This is a name check only, not a content-type probe.
pub fn is_fetchable_page(url: &Url, skip_extensions: &[String]) -> bool {
    let path = url.path().to_ascii_lowercase();

    !skip_extensions
        .iter()
        .any(|ext| path.ends_with(&format!(".{}", ext.to_ascii_lowercase())))
}

/// Returns the first denylisted substring found in `filename`, if any.
pub fn save_exclusion<'a>(filename: &str, denylist: &'a [String]) -> Option<&'a str> {
    denylist
        .iter()
        .map(String::as_str)
        .find(|word| filename.contains(word))
}
