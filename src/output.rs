// src/output.rs
// =============================================================================
// Where saved pages end up on disk.
//
// Every page maps to exactly one file name derived from its URL path:
//   https://example.com/           -> homepage.txt
//   https://example.com/about/     -> about.txt
//   https://example.com/docs/intro -> docs_intro.txt
//
// Query strings and fragments are not part of the name, so two URLs that
// differ only there write to the same file (last one wins).
// =============================================================================

use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Name used for a URL whose path is empty or just "/"
pub const HOMEPAGE_FILENAME: &str = "homepage.txt";

/// Derives the output file name for a page.
pub fn derive_filename(url: &Url) -> String {
    let stem = url.path().trim_matches('/').replace('/', "_");

    if stem.is_empty() {
        HOMEPAGE_FILENAME.to_string()
    } else {
        format!("{}.txt", stem)
    }
}

/// Writes page text into a single output directory.
#[derive(Debug)]
pub struct PageWriter {
    dir: PathBuf,
}

impl PageWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `text` to `<dir>/<filename>`, creating the directory if needed
    /// and replacing any existing file.
    pub async fn save(&self, filename: &str, text: &str) -> io::Result<PathBuf> {
        let path = self.dir.join(filename);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, text).await?;

        Ok(path)
    }
}
