// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (missing source = usage + exit 2)
// 2. Set up logging to stderr
// 3. Build the fetcher, link extractor and search controller
// 4. Run the search and print the distance (or -1) to stdout
// 5. Exit with proper code (0 = answer printed, 2 = error)
//
// stdout only ever carries the answer, so the tool composes with shell
// scripts. Progress and diagnostics go to stderr through `tracing`.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - the SearchError type
mod graph; // src/graph/ - DocumentId, Node and the BFS
mod links; // src/links/ - fetching pages and extracting article links

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use graph::{DocumentId, SearchController, SearchReport};
use links::{HttpFetcher, LinkExtractor, PageFetcher};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let source = DocumentId::parse(&cli.source).context("invalid source article")?;
    let target = DocumentId::parse(&cli.target).context("invalid --target")?;

    let extract_config = cli.extract_config();
    debug!(
        origin = %extract_config.origin,
        content_selector = %extract_config.content_selector,
        denylist = ?extract_config.denylist.prefixes(),
        "link extraction settings"
    );

    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&cli.fetch_config())?);
    let extractor = LinkExtractor::new(fetcher, extract_config)?;
    let mut controller = SearchController::new(extractor, cli.search_config());

    let report = controller
        .run(source.clone(), &target)
        .await
        .with_context(|| format!("search from {} to {} failed", source, target))?;

    println!("{}", render_report(&source, &target, &report, cli.json)?);
    Ok(())
}

// Shape of the --json output
#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    target: &'a str,
    distance: i64,
    pages_fetched: usize,
    visited: usize,
}

// The text printed to stdout: the bare distance, or a JSON object
fn render_report(
    source: &DocumentId,
    target: &DocumentId,
    report: &SearchReport,
    json: bool,
) -> Result<String> {
    if !json {
        return Ok(report.outcome.distance().to_string());
    }

    let json_report = JsonReport {
        source: source.as_str(),
        target: target.as_str(),
        distance: report.outcome.distance(),
        pages_fetched: report.pages_fetched,
        visited: report.visited,
    };
    Ok(serde_json::to_string_pretty(&json_report)?)
}

// Logs go to stderr. RUST_LOG wins when set; otherwise warnings only, or
// debug output for this crate with --verbose.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "bacon_hops=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
