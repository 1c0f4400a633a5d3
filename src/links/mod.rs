// src/links/mod.rs
// =============================================================================
// This module turns an article URL into its outgoing graph edges.
//
// Submodules:
// - fetch: retrieves the page HTML (reqwest, with retries)
// - filter: which hrefs count as article links
// - extract: parses the page and runs the filters
// =============================================================================

mod extract;
mod fetch;
mod filter;

pub use extract::{ExtractConfig, LinkExtractor, DEFAULT_CONTENT_SELECTOR, DEFAULT_ORIGIN};
pub use fetch::{FetchConfig, HttpFetcher, PageFetcher};
pub use filter::{NamespaceDenylist, DEFAULT_ARTICLE_PREFIX};
