// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Only the source article is required. Everything else has a default that
// reproduces the classic "Bacon number" game on English Wikipedia:
// - target: Kevin Bacon's article
// - origin: https://en.wikipedia.org
// - content region: the element with id="content"
// - links: under /wiki/, minus the Category:, File:, ... namespaces
//
// When the source is missing, clap prints the usage text to stderr and exits
// with a non-zero status before any search begins.
// =============================================================================

use std::time::Duration;

use clap::Parser;

use crate::graph::{SearchConfig, DEFAULT_TARGET};
use crate::links::{
    ExtractConfig, FetchConfig, NamespaceDenylist, DEFAULT_ARTICLE_PREFIX,
    DEFAULT_CONTENT_SELECTOR, DEFAULT_ORIGIN,
};

#[derive(Parser, Debug)]
#[command(
    name = "bacon-hops",
    version,
    about = "Count the link hops from a Wikipedia article to Kevin Bacon's article",
    long_about = "bacon-hops runs a breadth-first search over Wikipedia's article links, \
                  fetching pages as it goes, and prints the number of hops from the \
                  source article to the target article (-1 if the target is unreachable).\n\n\
                  Example: bacon-hops 'https://en.wikipedia.org/wiki/Minnesota'"
)]
pub struct Cli {
    /// Absolute URL of the article to start from
    pub source: String,

    /// Absolute URL of the article to search for
    #[arg(long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Site origin that relative article links are resolved against
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// CSS selector for the region of the page whose links count
    #[arg(long, default_value = DEFAULT_CONTENT_SELECTOR)]
    pub content_selector: String,

    /// Path prefix shared by all article links
    #[arg(long, default_value = DEFAULT_ARTICLE_PREFIX)]
    pub article_prefix: String,

    /// Path prefix of a non-article namespace to skip (repeatable)
    ///
    /// When given at least once, replaces the built-in list
    /// (Category:, File:, Help:, Special:, Template:, Template_talk:, User:, Wikipedia:)
    #[arg(long = "deny-prefix", value_name = "PREFIX")]
    pub deny_prefixes: Vec<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Extra attempts for a page after a timeout, connection error, 429 or 5xx
    #[arg(long, default_value_t = 2)]
    pub retries: u32,

    /// Pages fetched at once within one BFS layer
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Give up instead of expanding articles this many hops away (default: no limit)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Give up after discovering this many articles (default: no limit)
    #[arg(long)]
    pub max_visited: Option<usize>,

    /// Print a JSON report instead of the bare distance
    #[arg(long)]
    pub json: bool,

    /// Log each expanded article to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn extract_config(&self) -> ExtractConfig {
        let denylist = if self.deny_prefixes.is_empty() {
            NamespaceDenylist::default()
        } else {
            NamespaceDenylist::new(self.deny_prefixes.iter().cloned())
        };

        ExtractConfig {
            origin: self.origin.clone(),
            content_selector: self.content_selector.clone(),
            article_prefix: self.article_prefix.clone(),
            denylist,
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            retries: self.retries,
            ..FetchConfig::default()
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            concurrency: usize::from(self.concurrency),
            max_depth: self.max_depth,
            max_visited: self.max_visited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_is_required() {
        let result = Cli::try_parse_from(["bacon-hops"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["bacon-hops", "https://en.wikipedia.org/wiki/Minnesota"])
            .unwrap();

        assert_eq!(cli.source, "https://en.wikipedia.org/wiki/Minnesota");
        assert_eq!(cli.target, "https://en.wikipedia.org/wiki/Kevin_Bacon");
        assert!(!cli.json);

        let extract = cli.extract_config();
        assert_eq!(extract.origin, "https://en.wikipedia.org");
        assert_eq!(extract.content_selector, "#content");
        assert_eq!(extract.article_prefix, "/wiki/");
        assert_eq!(extract.denylist, NamespaceDenylist::default());

        let search = cli.search_config();
        assert_eq!(search.concurrency, 1);
        assert_eq!(search.max_depth, None);
        assert_eq!(search.max_visited, None);

        assert_eq!(cli.fetch_config().retries, 2);
    }

    #[test]
    fn test_deny_prefix_replaces_defaults() {
        let cli = Cli::try_parse_from([
            "bacon-hops",
            "https://en.wikipedia.org/wiki/Minnesota",
            "--deny-prefix",
            "/wiki/Portal:",
            "--deny-prefix",
            "/wiki/Talk:",
        ])
        .unwrap();

        let denylist = cli.extract_config().denylist;
        assert_eq!(denylist.prefixes(), ["/wiki/Portal:", "/wiki/Talk:"]);
    }

    #[test]
    fn test_limits_and_concurrency() {
        let cli = Cli::try_parse_from([
            "bacon-hops",
            "https://en.wikipedia.org/wiki/Minnesota",
            "--concurrency",
            "8",
            "--max-depth",
            "6",
            "--max-visited",
            "100000",
        ])
        .unwrap();

        let search = cli.search_config();
        assert_eq!(search.concurrency, 8);
        assert_eq!(search.max_depth, Some(6));
        assert_eq!(search.max_visited, Some(100_000));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result = Cli::try_parse_from([
            "bacon-hops",
            "https://en.wikipedia.org/wiki/Minnesota",
            "--concurrency",
            "0",
        ]);
        assert!(result.is_err());
    }
}
