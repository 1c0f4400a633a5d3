// src/test_support.rs
// =============================================================================
// An in-memory article graph for tests.
//
// GraphFetcher implements PageFetcher without touching the network. Each
// article is rendered as a small Wikipedia-shaped page: its links sit in the
// #content region, surrounded by navigation and footer links that the
// extractor must ignore. Every fetch is recorded so tests can check what was
// downloaded and in which order.
// =============================================================================

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, SearchError};
use crate::graph::DocumentId;
use crate::links::{PageFetcher, DEFAULT_ORIGIN};

#[derive(Default)]
pub struct GraphFetcher {
    pages: HashMap<DocumentId, String>,
    fetched: Mutex<Vec<DocumentId>>,
}

impl GraphFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    // The DocumentId of an article title on the default site
    pub fn article(title: &str) -> DocumentId {
        DocumentId::parse(&format!("{}/wiki/{}", DEFAULT_ORIGIN, title)).unwrap()
    }

    // Builds a graph from (from, to) edges. Every title mentioned gets a
    // page, even if it has no outgoing links.
    pub fn from_edges(edges: &[(&str, &str)]) -> Self {
        let mut titles: Vec<&str> = Vec::new();
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();

        for &(from, to) in edges {
            for title in [from, to] {
                if !titles.contains(&title) {
                    titles.push(title);
                }
            }
            adjacency.entry(from).or_default().push(to);
        }

        titles.into_iter().fold(Self::new(), |graph, title| {
            let links = adjacency.get(title).cloned().unwrap_or_default();
            graph.with_links(title, &links)
        })
    }

    // Adds (or replaces) a page linking to the given titles in order
    pub fn with_links(self, title: &str, links: &[&str]) -> Self {
        let html = render_page(title, links);
        self.with_html(title, &html)
    }

    // Adds (or replaces) a page with hand-written HTML
    pub fn with_html(mut self, title: &str, html: &str) -> Self {
        self.pages.insert(Self::article(title), html.to_string());
        self
    }

    // Every id fetched so far, in fetch order
    pub fn fetched(&self) -> Vec<DocumentId> {
        self.fetched.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetched.lock().unwrap().len()
    }
}

#[async_trait]
impl PageFetcher for GraphFetcher {
    async fn fetch(&self, id: &DocumentId) -> Result<String> {
        self.fetched.lock().unwrap().push(id.clone());

        self.pages.get(id).cloned().ok_or_else(|| SearchError::Fetch {
            url: id.to_string(),
            reason: "HTTP 404 Not Found".to_string(),
        })
    }
}

// Each link appears twice, once plain and once with a fragment, plus some
// links the extractor has to drop
fn render_page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| {
            format!(
                r##"<li><a href="/wiki/{link}">{link}</a> (<a href="/wiki/{link}#History">history</a>)</li>"##
            )
        })
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body>
<div id="mw-navigation"><a href="/wiki/Main_Page">Main page</a></div>
<div id="content">
  <h1>{title}</h1>
  <ul>{anchors}</ul>
  <a href="#cite_note-1">[1]</a>
  <a href="https://example.org/{title}">External</a>
  <a href="/wiki/Category:{title}">Category</a>
</div>
<div id="footer"><a href="/wiki/Wikipedia:About">About</a></div>
</body>
</html>"##
    )
}
