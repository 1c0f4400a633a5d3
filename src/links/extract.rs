// src/links/extract.rs
// =============================================================================
// Turns an article into the list of articles it links to.
//
// Pipeline for one page:
// 1. Fetch the HTML through the PageFetcher
// 2. Find the content region (by default the element with id="content") so
//    navigation, sidebars and footers don't add noise edges
// 3. Collect the href of every <a> inside it (anchors without one are skipped)
// 4. Keep internal article links ("/wiki/...") only
// 5. Drop non-article namespaces (Category:, File:, ...)
// 6. Strip "#fragment" suffixes
// 7. Resolve against the site origin to get an absolute DocumentId
// 8. Remove duplicates, keeping the first occurrence
//
// The extractor itself keeps no state between calls. Caching happens one
// level up, in each graph Node (see graph/node.rs).
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;

use scraper::{Html, Selector};
use tracing::trace;
use url::Url;

use super::fetch::PageFetcher;
use super::filter::{is_internal_article, strip_fragment, NamespaceDenylist, DEFAULT_ARTICLE_PREFIX};
use crate::error::{Result, SearchError};
use crate::graph::DocumentId;

pub const DEFAULT_ORIGIN: &str = "https://en.wikipedia.org";
pub const DEFAULT_CONTENT_SELECTOR: &str = "#content";

// Where links come from and which of them count
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Site origin that root-relative links are resolved against
    pub origin: String,
    /// CSS selector for the content region
    pub content_selector: String,
    /// Path prefix of article links
    pub article_prefix: String,
    pub denylist: NamespaceDenylist,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            content_selector: DEFAULT_CONTENT_SELECTOR.to_string(),
            article_prefix: DEFAULT_ARTICLE_PREFIX.to_string(),
            denylist: NamespaceDenylist::default(),
        }
    }
}

pub struct LinkExtractor {
    fetcher: Arc<dyn PageFetcher>,
    origin: Url,
    content_selector: String,
    content: Selector,
    anchors: Selector,
    article_prefix: String,
    denylist: NamespaceDenylist,
}

impl LinkExtractor {
    // Builds an extractor, validating the origin and content selector up
    // front so bad flags fail before any page is fetched
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ExtractConfig) -> Result<Self> {
        let origin = Url::parse(&config.origin).map_err(|e| SearchError::InvalidUrl {
            input: config.origin.clone(),
            reason: e.to_string(),
        })?;
        let content = parse_selector(&config.content_selector)?;
        let anchors = parse_selector("a")?;

        Ok(Self {
            fetcher,
            origin,
            content_selector: config.content_selector,
            content,
            anchors,
            article_prefix: config.article_prefix,
            denylist: config.denylist,
        })
    }

    // Fetches a page and returns its outgoing article links
    pub async fn extract(&self, id: &DocumentId) -> Result<Vec<DocumentId>> {
        let html = self.fetcher.fetch(id).await?;
        self.links_from_html(id, &html)
    }

    // Steps 2-8 of the pipeline, on HTML that is already in memory
    //
    // Kept synchronous: scraper's Html is not Send, so it must never live
    // across an .await.
    pub fn links_from_html(&self, id: &DocumentId, html: &str) -> Result<Vec<DocumentId>> {
        let document = Html::parse_document(html);

        let regions: Vec<_> = document.select(&self.content).collect();
        if regions.is_empty() {
            return Err(SearchError::Parse {
                url: id.to_string(),
                reason: format!("no element matches content selector '{}'", self.content_selector),
            });
        }

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for region in regions {
            for anchor in region.select(&self.anchors) {
                let Some(href) = anchor.value().attr("href") else {
                    continue;
                };

                if !is_internal_article(href, &self.article_prefix) {
                    continue;
                }
                if self.denylist.is_denied(href) {
                    trace!(href, "skipping non-article namespace");
                    continue;
                }

                let link = match DocumentId::resolve(&self.origin, strip_fragment(href)) {
                    Ok(link) => link,
                    Err(e) => {
                        trace!(href, error = %e, "skipping unresolvable link");
                        continue;
                    }
                };

                // Nested or repeated regions can yield the same anchor twice;
                // the set catches that along with ordinary repeats
                if seen.insert(link.clone()) {
                    links.push(link);
                }
            }
        }

        Ok(links)
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| SearchError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why select the content region first?
//    - document.select(&content) finds the region(s), then region.select(&a)
//      only looks inside them
//    - A plain "a" over the whole page would also pick up the sidebar,
//      the header menu and the footer, which link to the same pages everywhere
//
// 2. What is `let ... else`?
//    - let Some(href) = ... else { continue; };
//    - Binds href if the pattern matches, otherwise runs the else block
//    - The else block must leave the scope (continue, return, break)
//
// 3. Why a HashSet *and* a Vec?
//    - The Vec keeps the page order (the search walks links in that order)
//    - The HashSet answers "seen this one already?" in O(1)
// -----------------------------------------------------------------------------
