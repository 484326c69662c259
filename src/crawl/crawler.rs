// src/crawl/crawler.rs
// =============================================================================
// The crawl loop: breadth-first over one site, one page at a time.
//
// How it works:
// 1. Start with the start URL in the frontier at depth 0
// 2. Pop the next URL, mark it visited, load it with the Fetcher
// 3. Extract and normalize the page text, hash it
// 4. Unseen text is saved (unless the filename is denylisted)
// 5. Same-site links go to the back of the frontier at depth + 1
// 6. Repeat until the frontier is empty, then release the Fetcher
//
// Rust concepts:
// - HashSet: to track visited URLs (O(1) lookup)
// - Box<dyn Fetcher>: the crawler doesn't care how pages are loaded
// =============================================================================

use std::collections::HashSet;
use url::Url;

use super::dedup::{ContentHash, ContentHashes};
use super::frontier::{Frontier, FrontierEntry};
use super::outcome::{CrawlReport, PageError, PageOutcome};
use crate::classify::{is_fetchable_page, is_same_domain, save_exclusion};
use crate::config::CrawlConfig;
use crate::extract::{extract_links, extract_text, normalize};
use crate::fetch::Fetcher;
use crate::output::{derive_filename, PageWriter};

pub struct Crawler {
    config: CrawlConfig,
    fetcher: Box<dyn Fetcher>,
    writer: PageWriter,
    frontier: Frontier,
    visited: HashSet<Url>,
    hashes: ContentHashes,
}

impl Crawler {
    pub fn new(config: CrawlConfig, fetcher: Box<dyn Fetcher>) -> Self {
        let writer = PageWriter::new(config.output_dir.clone());
        let frontier = Frontier::seeded(config.start_url.clone());

        Self {
            config,
            fetcher,
            writer,
            frontier,
            visited: HashSet::new(),
            hashes: ContentHashes::default(),
        }
    }

    /// Crawls until the frontier is empty and returns what happened to every
    /// page. The fetcher is closed exactly once before returning.
    pub async fn run(mut self) -> CrawlReport {
        tracing::info!(
            start_url = %self.config.start_url,
            max_depth = self.config.max_depth,
            output_dir = %self.writer.dir().display(),
            "starting crawl"
        );

        let mut report = CrawlReport::new(
            self.config.start_url.to_string(),
            self.config.output_dir.clone(),
            self.config.max_depth,
        );

        while let Some(entry) = self.frontier.pop() {
            // The same URL can be queued several times before it's processed
            if self.visited.contains(&entry.url) {
                continue;
            }

            if entry.depth > self.config.max_depth {
                continue;
            }

            // Mark before fetching so a failed page is never retried
            self.visited.insert(entry.url.clone());

            tracing::info!(
                depth = entry.depth,
                url = %entry.url,
                pending = self.frontier.len(),
                "crawling"
            );

            let outcome = self.process(&entry).await;
            report.record(entry.url.to_string(), entry.depth, outcome);
        }

        if let Err(e) = self.fetcher.close().await {
            tracing::warn!(error = %e, "failed to release fetcher");
        }

        let summary = report.summary();
        tracing::info!(
            visited = self.visited.len(),
            unique_pages = self.hashes.len(),
            saved = summary.saved,
            failed = summary.failed,
            "crawl finished"
        );

        report
    }

    // Handles one dequeued URL and, if allowed, queues its links
    async fn process(&mut self, entry: &FrontierEntry) -> PageOutcome {
        if !is_fetchable_page(&entry.url, &self.config.skip_extensions) {
            tracing::info!(url = %entry.url, "skipping non-page URL");
            return PageOutcome::SkippedNonPage;
        }

        let html = match self.fetcher.load(&entry.url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %entry.url, error = %e, "error crawling page");
                return PageError::from(e).into();
            }
        };

        let text = normalize(&extract_text(&html));
        let hash = ContentHash::of(&text);

        if !self.hashes.insert(hash) {
            tracing::info!(url = %entry.url, hash = %hash.short(), "skipping duplicate content");
            return PageOutcome::Duplicate;
        }

        let outcome = self.store(&entry.url, &text).await;

        if outcome.follows_links() && entry.depth < self.config.max_depth {
            let queued = self.enqueue_links(&html, entry);
            tracing::debug!(url = %entry.url, queued, "queued links");
        }

        outcome
    }

    // Saves the page text unless its filename is denylisted
    async fn store(&self, url: &Url, text: &str) -> PageOutcome {
        let filename = derive_filename(url);

        if let Some(matched) = save_exclusion(&filename, &self.config.save_denylist) {
            tracing::info!(url = %url, filename = %filename, matched, "not saving excluded page");
            return PageOutcome::Excluded {
                filename,
                matched: matched.to_string(),
            };
        }

        match self.writer.save(&filename, text).await {
            Ok(path) => {
                tracing::info!(url = %url, path = %path.display(), "saved page");
                PageOutcome::Saved { path }
            }
            Err(source) => {
                let error = PageError::Save {
                    path: self.writer.dir().join(&filename),
                    source,
                };
                tracing::warn!(url = %url, error = %error, "error saving page");
                error.into()
            }
        }
    }

    // Pushes every unvisited same-site link at depth + 1.
    // Returns how many were queued.
    fn enqueue_links(&mut self, html: &str, entry: &FrontierEntry) -> usize {
        let mut queued = 0;

        for link in extract_links(html, &entry.url) {
            if is_same_domain(&link, &self.config.start_url) && !self.visited.contains(&link) {
                self.frontier.push(link, entry.depth + 1);
                queued += 1;
            }
        }

        queued
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why mark a URL visited before fetching it?
//    - If the fetch fails, the URL must not come back through another link
//    - Each URL gets exactly one attempt; there are no retries
//
// 2. Duplicate vs excluded pages:
//    - A duplicate page is a dead end: its links are not followed
//    - An excluded page (e.g. privacy policy) is not saved, but its links are
//
// 3. Why check depth twice (here and when queueing)?
//    - Links are only queued from pages below max_depth, so the check in the
//      loop never fires in practice; it keeps the bound obvious
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::outcome::FailedStage;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    enum Scripted {
        Html(String),
        Timeout,
    }

    // Serves canned pages and records every load and close
    #[derive(Default)]
    struct ScriptedFetcher {
        pages: HashMap<String, Scripted>,
        loads: Arc<Mutex<Vec<String>>>,
        closes: Arc<Mutex<usize>>,
    }

    impl ScriptedFetcher {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), Scripted::Html(html.to_string()));
            self
        }

        fn timeout(mut self, url: &str) -> Self {
            self.pages.insert(url.to_string(), Scripted::Timeout);
            self
        }
    }

    #[async_trait]
    impl Fetcher for ScriptedFetcher {
        async fn load(&mut self, url: &Url) -> Result<String, FetchError> {
            self.loads.lock().unwrap().push(url.to_string());

            match self.pages.get(url.as_str()) {
                Some(Scripted::Html(html)) => Ok(html.clone()),
                Some(Scripted::Timeout) => Err(FetchError::timeout(url, Duration::from_secs(10))),
                None => Err(FetchError::navigation(url, "net::ERR_NAME_NOT_RESOLVED")),
            }
        }

        async fn close(&mut self) -> Result<(), FetchError> {
            *self.closes.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct Run {
        report: CrawlReport,
        loads: Vec<String>,
        closes: usize,
    }

    async fn crawl(start: &str, max_depth: usize, out: &Path, fetcher: ScriptedFetcher) -> Run {
        let loads = fetcher.loads.clone();
        let closes = fetcher.closes.clone();
        let config = CrawlConfig::new(start, out, max_depth).unwrap();

        let report = Crawler::new(config, Box::new(fetcher)).run().await;

        let loads = loads.lock().unwrap().clone();
        let closes = *closes.lock().unwrap();
        Run { report, loads, closes }
    }

    fn body(inner: &str) -> String {
        format!("<html><body>{}</body></html>", inner)
    }

    #[tokio::test]
    async fn test_single_page_becomes_homepage_file() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default().page("https://example.com/", &body("Hello"));

        let run = crawl("https://example.com", 2, tmp.path(), fetcher).await;

        assert_eq!(run.loads, vec!["https://example.com/"]);
        assert_eq!(run.report.pages.len(), 1);
        let saved = std::fs::read_to_string(tmp.path().join("homepage.txt")).unwrap();
        assert_eq!(saved, "Hello");
        assert_eq!(run.closes, 1);
    }

    #[tokio::test]
    async fn test_cross_domain_links_are_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://example.com/",
                &body(r#"Home <a href="https://example.com/about">About</a> <a href="https://other.com/x">Other</a>"#),
            )
            .page("https://example.com/about", &body("About us"));

        let run = crawl("https://example.com", 1, tmp.path(), fetcher).await;

        assert_eq!(run.loads, vec!["https://example.com/", "https://example.com/about"]);
        assert!(run.report.outcome_of("https://other.com/x").is_none());
        assert!(tmp.path().join("about.txt").exists());
    }

    #[tokio::test]
    async fn test_duplicate_page_is_not_saved_or_expanded() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://example.com/",
                &body("Hello\n\n\n\n\n\nWorld<a href=\"/copy\"></a>"),
            )
            .page(
                "https://example.com/copy",
                &body("Hello\n\n\nWorld<a href=\"/deeper\"></a>"),
            )
            .page("https://example.com/deeper", &body("Deeper"));

        let run = crawl("https://example.com", 3, tmp.path(), fetcher).await;

        assert_eq!(
            run.report.outcome_of("https://example.com/copy"),
            Some(&PageOutcome::Duplicate)
        );
        assert!(!tmp.path().join("copy.txt").exists());
        assert!(!run.loads.contains(&"https://example.com/deeper".to_string()));

        let saved = std::fs::read_to_string(tmp.path().join("homepage.txt")).unwrap();
        assert_eq!(saved, "Hello\n\n\nWorld");
    }

    #[tokio::test]
    async fn test_excluded_page_is_not_saved_but_expanded() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default()
            .page("https://example.com/", &body(r#"Home <a href="/privacy-policy">Privacy</a>"#))
            .page(
                "https://example.com/privacy-policy",
                &body(r#"We care <a href="/team">Team</a>"#),
            )
            .page("https://example.com/team", &body("The team"));

        let run = crawl("https://example.com", 2, tmp.path(), fetcher).await;

        assert!(matches!(
            run.report.outcome_of("https://example.com/privacy-policy"),
            Some(PageOutcome::Excluded { matched, .. }) if matched == "privacy"
        ));
        assert!(!tmp.path().join("privacy-policy.txt").exists());
        assert!(run.loads.contains(&"https://example.com/team".to_string()));
        assert!(tmp.path().join("team.txt").exists());
    }

    #[tokio::test]
    async fn test_max_depth_zero_fetches_only_start() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default()
            .page("https://example.com/", &body(r#"Home <a href="/about">About</a>"#))
            .page("https://example.com/about", &body("About"));

        let run = crawl("https://example.com", 0, tmp.path(), fetcher).await;

        assert_eq!(run.loads, vec!["https://example.com/"]);
        assert_eq!(run.report.pages.len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_does_not_stop_the_crawl() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://example.com/",
                &body(r#"Home <a href="/slow">Slow</a> <a href="/fast">Fast</a>"#),
            )
            .timeout("https://example.com/slow")
            .page("https://example.com/fast", &body("Fast page"));

        let run = crawl("https://example.com", 1, tmp.path(), fetcher).await;

        assert!(matches!(
            run.report.outcome_of("https://example.com/slow"),
            Some(PageOutcome::Failed { stage: FailedStage::Fetch, .. })
        ));
        assert!(tmp.path().join("fast.txt").exists());
        assert_eq!(run.report.summary().failed, 1);
        assert_eq!(run.closes, 1);
    }

    #[tokio::test]
    async fn test_each_url_is_loaded_once() {
        let tmp = tempfile::tempdir().unwrap();
        let links = r#"<a href="/">Home</a> <a href="/a">A</a> <a href="/b">B</a> <a href="/a">A again</a>"#;
        let fetcher = ScriptedFetcher::default()
            .page("https://example.com/", &body(&format!("Home {}", links)))
            .page("https://example.com/a", &body(&format!("Page A {}", links)))
            .page("https://example.com/b", &body(&format!("Page B {}", links)));

        let run = crawl("https://example.com", 3, tmp.path(), fetcher).await;

        let unique: HashSet<_> = run.loads.iter().collect();
        assert_eq!(unique.len(), run.loads.len());
        assert_eq!(run.loads.len(), 3);
        assert_eq!(run.report.pages.len(), 3);
    }

    #[tokio::test]
    async fn test_depth_grows_one_hop_at_a_time() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default()
            .page("https://example.com/", &body(r#"Root <a href="/one">1</a>"#))
            .page("https://example.com/one", &body(r#"One <a href="/two">2</a>"#))
            .page("https://example.com/two", &body(r#"Two <a href="/three">3</a>"#))
            .page("https://example.com/three", &body("Three"));

        let run = crawl("https://example.com", 2, tmp.path(), fetcher).await;

        let depths: Vec<_> = run
            .report
            .pages
            .iter()
            .map(|p| (p.url.as_str(), p.depth))
            .collect();
        assert_eq!(
            depths,
            vec![
                ("https://example.com/", 0),
                ("https://example.com/one", 1),
                ("https://example.com/two", 2),
            ]
        );
        assert!(run.report.pages.iter().all(|p| p.depth <= 2));
    }

    #[tokio::test]
    async fn test_breadth_first_order() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default()
            .page(
                "https://example.com/",
                &body(r#"Root <a href="/a">A</a> <a href="/b">B</a>"#),
            )
            .page("https://example.com/a", &body(r#"A <a href="/a/deep">deep</a>"#))
            .page("https://example.com/b", &body("B"))
            .page("https://example.com/a/deep", &body("Deep"));

        let run = crawl("https://example.com", 2, tmp.path(), fetcher).await;

        assert_eq!(
            run.loads,
            vec![
                "https://example.com/",
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/a/deep",
            ]
        );
        assert!(tmp.path().join("a_deep.txt").exists());
    }

    #[tokio::test]
    async fn test_images_are_never_fetched() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default().page(
            "https://example.com/",
            &body(r#"Home <a href="/logo.PNG">Logo</a>"#),
        );

        let run = crawl("https://example.com", 1, tmp.path(), fetcher).await;

        assert_eq!(run.loads, vec!["https://example.com/"]);
        assert_eq!(
            run.report.outcome_of("https://example.com/logo.PNG"),
            Some(&PageOutcome::SkippedNonPage)
        );
    }

    #[tokio::test]
    async fn test_fetcher_closed_once_when_everything_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = ScriptedFetcher::default().timeout("https://example.com/");

        let run = crawl("https://example.com", 2, tmp.path(), fetcher).await;

        assert_eq!(run.report.summary().failed, 1);
        assert_eq!(run.closes, 1);
        assert!(!tmp.path().join("homepage.txt").exists());
    }

    #[tokio::test]
    async fn test_failed_save_stops_expansion() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let fetcher = ScriptedFetcher::default()
            .page("https://example.com/", &body(r#"Home <a href="/next">Next</a>"#))
            .page("https://example.com/next", &body("Next"));

        let run = crawl("https://example.com", 2, &blocker, fetcher).await;

        assert!(matches!(
            run.report.outcome_of("https://example.com/"),
            Some(PageOutcome::Failed { stage: FailedStage::Save, .. })
        ));
        assert_eq!(run.loads, vec!["https://example.com/"]);
        assert_eq!(run.report.pages.len(), 1);
        assert_eq!(run.closes, 1);
    }
}
