// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (RUST_LOG controls verbosity, default "info")
// 3. Acquire a fetcher (launch Chrome, or build an HTTP client)
// 4. Crawl the site and print a summary (or the JSON report)
// 5. Exit with 0 on completion, 1 if the crawl could not start
//
// Individual page failures never change the exit code: they are logged and
// show up in the report.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod classify; // src/classify.rs - same-site / fetchable / denylist checks
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - crawl settings
mod crawl; // src/crawl/ - the crawl loop
mod extract; // src/extract/ - text and links from HTML
mod fetch; // src/fetch/ - loading pages
mod output; // src/output.rs - file naming and writing

use anyhow::{Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, FetcherKind};
use config::CrawlConfig;
use crawl::{CrawlReport, Crawler, PageOutcome};
use fetch::{BrowserFetcher, Fetcher, HttpFetcher};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,chromiumoxide=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = CrawlConfig::new(&cli.start_url, &cli.output_dir, cli.max_depth)?
        .with_page_timeout(Duration::from_secs(cli.page_timeout));

    // The only fetcher failure that stops us: nothing has been crawled yet
    let fetcher: Box<dyn Fetcher> = match cli.fetcher {
        FetcherKind::Browser => Box::new(
            BrowserFetcher::launch(!cli.headed, config.page_timeout)
                .await
                .context("Could not start the browser")?,
        ),
        FetcherKind::Http => Box::new(
            HttpFetcher::new(config.page_timeout).context("Could not build the HTTP client")?,
        ),
    };

    let report = Crawler::new(config, fetcher).run().await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}

// Prints one line per page followed by per-outcome counts
fn print_summary(report: &CrawlReport) {
    println!("{:<8} {:<60} {:<30}", "DEPTH", "URL", "RESULT");
    println!("{}", "=".repeat(98));

    for page in &report.pages {
        // Truncate URL if too long for display
        let url_display = if page.url.chars().count() > 57 {
            format!("{}...", page.url.chars().take(57).collect::<String>())
        } else {
            page.url.clone()
        };

        println!("{:<8} {:<60} {:<30}", page.depth, url_display, format_outcome(&page.outcome));
    }

    println!();

    let summary = report.summary();
    println!("📊 Summary ({}):", report.output_dir.display());
    println!("   💾 Saved: {}", summary.saved);
    println!("   🚫 Excluded: {}", summary.excluded);
    println!("   ♻️  Duplicates: {}", summary.duplicates);
    println!("   🖼️  Skipped: {}", summary.skipped);
    println!("   ❌ Failed: {}", summary.failed);
    println!("   📋 Total: {}", report.pages.len());
}

fn format_outcome(outcome: &PageOutcome) -> String {
    match outcome {
        PageOutcome::Saved { path } => format!("💾 {}", path.display()),
        PageOutcome::Excluded { matched, .. } => format!("🚫 EXCLUDED ({})", matched),
        PageOutcome::Duplicate => "♻️  DUPLICATE".to_string(),
        PageOutcome::SkippedNonPage => "🖼️  NOT A PAGE".to_string(),
        PageOutcome::Failed { reason, .. } => format!("❌ {}", reason),
    }
}
