// src/crawl/outcome.rs
// =============================================================================
// What happened to each page, and the report built from that.
//
// Every URL the crawler dequeues ends in exactly one PageOutcome. Failures
// are ordinary values here rather than errors bubbling up, because one bad
// page must never stop the crawl.
//
// #[derive(Serialize)] lets us print the whole report with --json
// =============================================================================

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;

/// The ways processing a fetched URL can fail
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("could not write {}: {source}", .path.display())]
    Save { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedStage {
    Fetch,
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Text written to `path`
    Saved { path: PathBuf },
    /// New content, but the file name hit the save denylist
    Excluded { filename: String, matched: String },
    /// Same normalized text as a page we already processed
    Duplicate,
    /// URL looks like an image, never fetched
    SkippedNonPage,
    Failed { stage: FailedStage, reason: String },
}

impl PageOutcome {
    /// Whether the crawler may queue links found on this page.
    ///
    /// Excluded pages still lead somewhere; duplicates are dead ends.
    pub fn follows_links(&self) -> bool {
        matches!(self, PageOutcome::Saved { .. } | PageOutcome::Excluded { .. })
    }
}

impl From<PageError> for PageOutcome {
    fn from(error: PageError) -> Self {
        let stage = match error {
            PageError::Fetch(_) => FailedStage::Fetch,
            PageError::Save { .. } => FailedStage::Save,
        };

        PageOutcome::Failed {
            stage,
            reason: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub depth: usize,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub saved: usize,
    pub excluded: usize,
    pub duplicates: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    fn count(&mut self, outcome: &PageOutcome) {
        match outcome {
            PageOutcome::Saved { .. } => self.saved += 1,
            PageOutcome::Excluded { .. } => self.excluded += 1,
            PageOutcome::Duplicate => self.duplicates += 1,
            PageOutcome::SkippedNonPage => self.skipped += 1,
            PageOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// Everything a finished crawl did, in processing order
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub start_url: String,
    pub output_dir: PathBuf,
    pub max_depth: usize,
    pub summary: Summary,
    pub pages: Vec<PageRecord>,
}

impl CrawlReport {
    pub fn new(start_url: String, output_dir: PathBuf, max_depth: usize) -> Self {
        Self {
            start_url,
            output_dir,
            max_depth,
            summary: Summary::default(),
            pages: Vec::new(),
        }
    }

    pub fn record(&mut self, url: String, depth: usize, outcome: PageOutcome) {
        self.summary.count(&outcome);
        self.pages.push(PageRecord { url, depth, outcome });
    }

    /// Per-outcome counts over every recorded page
    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Looks up the outcome recorded for `url`
    #[cfg(test)]
    pub fn outcome_of(&self, url: &str) -> Option<&PageOutcome> {
        self.pages.iter().find(|p| p.url == url).map(|p| &p.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_only_saved_and_excluded_follow_links() {
        assert!(PageOutcome::Saved { path: "a.txt".into() }.follows_links());
        assert!(PageOutcome::Excluded {
            filename: "privacy.txt".into(),
            matched: "privacy".into()
        }
        .follows_links());
        assert!(!PageOutcome::Duplicate.follows_links());
        assert!(!PageOutcome::SkippedNonPage.follows_links());
    }

    #[test]
    fn test_fetch_error_becomes_failed_outcome() {
        let error = PageError::from(FetchError::Timeout {
            url: "https://example.com/slow".into(),
            waited: Duration::from_secs(10),
        });
        let outcome = PageOutcome::from(error);

        match outcome {
            PageOutcome::Failed { stage, reason } => {
                assert_eq!(stage, FailedStage::Fetch);
                assert!(reason.contains("timed out"));
                assert!(reason.contains("https://example.com/slow"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn test_summary_counts_each_outcome() {
        let mut report = CrawlReport::new("https://example.com/".into(), "out".into(), 1);
        report.record("a".into(), 0, PageOutcome::Saved { path: "a.txt".into() });
        report.record("b".into(), 1, PageOutcome::Duplicate);
        report.record("c".into(), 1, PageOutcome::Duplicate);
        report.record("d".into(), 1, PageOutcome::SkippedNonPage);

        let summary = report.summary();
        assert_eq!(summary.saved, 1);
        assert_eq!(summary.duplicates, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(report.outcome_of("b"), Some(&PageOutcome::Duplicate));
    }

    #[test]
    fn test_json_shape() {
        let mut report = CrawlReport::new("https://example.com/".into(), "out".into(), 1);
        report.record(
            "https://example.com/".into(),
            0,
            PageOutcome::Saved { path: "out/homepage.txt".into() },
        );
        report.record("https://example.com/copy".into(), 1, PageOutcome::Duplicate);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pages"][1]["outcome"], "duplicate");
        assert_eq!(json["pages"][1]["depth"], 1);
        assert_eq!(json["summary"]["saved"], 1);
        assert_eq!(json["summary"]["duplicates"], 1);
        assert_eq!(json["summary"]["failed"], 0);
    }
}
