// src/graph/search.rs
// =============================================================================
// Breadth-first search from a source article to a target article.
//
// How it works:
// 1. If source == target, the answer is 0 and nothing is fetched
// 2. Otherwise put the source in the frontier (a FIFO queue) and mark it
//    visited
// 3. Take the node at the head of the frontier and fetch its links
// 4. Walk the links in page order:
//    - the target? done, the distance is this node's depth + 1
//    - already visited? skip it
//    - otherwise mark it visited and queue it one level deeper
// 5. Repeat until the target turns up or the frontier is empty
//
// The target is recognised while scanning the links of its parent, not when
// it is later dequeued. That saves fetching the target page and stops the
// search one level earlier.
//
// An id is marked visited when it is queued, not when it is expanded, so the
// frontier never holds the same article twice.
//
// Concurrency:
// With concurrency N > 1, up to N nodes of the *same depth* are taken from
// the head of the frontier and fetched at once. Their links are then walked
// one node at a time in queue order, on this task, so the visited set is only
// ever touched from one place and the result is the same as with N = 1.
// Nodes one level deeper are not fetched until the whole batch is done.
// =============================================================================

use std::collections::{HashSet, VecDeque};

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use super::{DocumentId, Node};
use crate::error::{Result, SearchError};
use crate::links::LinkExtractor;

// Searched for unless --target says otherwise
pub const DEFAULT_TARGET: &str = "https://en.wikipedia.org/wiki/Kevin_Bacon";

// Tuning and safety limits for one search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Pages fetched at once within a BFS layer (1 = strictly one at a time)
    pub concurrency: usize,
    /// Do not expand nodes at this depth or deeper (None = unbounded)
    pub max_depth: Option<usize>,
    /// Stop once this many articles have been discovered (None = unbounded)
    pub max_visited: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            max_depth: None,
            max_visited: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target is this many hops from the source
    Found(usize),
    /// Every article reachable from the source was explored without
    /// meeting the target
    Unreachable,
}

impl SearchOutcome {
    pub const UNREACHABLE_DISTANCE: i64 = -1;

    // The distance as printed: the hop count, or -1 when unreachable
    pub fn distance(&self) -> i64 {
        match self {
            SearchOutcome::Found(hops) => *hops as i64,
            SearchOutcome::Unreachable => Self::UNREACHABLE_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    /// Pages downloaded during the search
    pub pages_fetched: usize,
    /// Articles discovered (queued), including the source
    pub visited: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchState {
    Init,
    Exploring,
    Found(usize),
    Exhausted,
}

pub struct SearchController {
    extractor: LinkExtractor,
    config: SearchConfig,
    state: SearchState,
    frontier: VecDeque<Node>,
    visited: HashSet<DocumentId>,
    pages_fetched: usize,
    last_depth: usize,
}

impl SearchController {
    pub fn new(extractor: LinkExtractor, config: SearchConfig) -> Self {
        Self {
            extractor,
            config,
            state: SearchState::Init,
            frontier: VecDeque::new(),
            visited: HashSet::new(),
            pages_fetched: 0,
            last_depth: 0,
        }
    }

    // Runs one search. All queue and visited state is reset first, so the
    // same controller can be reused for several searches.
    pub async fn run(&mut self, source: DocumentId, target: &DocumentId) -> Result<SearchReport> {
        self.reset();
        info!(%source, %target, "starting search");

        if &source == target {
            self.state = SearchState::Found(0);
        } else {
            self.visited.insert(source.clone());
            self.frontier.push_back(Node::source(source));
            self.state = SearchState::Exploring;
        }

        while self.state == SearchState::Exploring {
            self.step(target).await?;
        }

        let outcome = match self.state {
            SearchState::Found(hops) => SearchOutcome::Found(hops),
            _ => SearchOutcome::Unreachable,
        };
        let report = SearchReport {
            outcome,
            pages_fetched: self.pages_fetched,
            visited: self.visited.len(),
        };
        info!(
            distance = outcome.distance(),
            pages_fetched = report.pages_fetched,
            visited = report.visited,
            "search finished"
        );

        // Nodes and their cached links are not needed past this point
        self.frontier.clear();
        Ok(report)
    }

    fn reset(&mut self) {
        self.state = SearchState::Init;
        self.frontier.clear();
        self.visited.clear();
        self.pages_fetched = 0;
        self.last_depth = 0;
    }

    // Expands one batch of same-depth nodes
    async fn step(&mut self, target: &DocumentId) -> Result<()> {
        let batch = self.next_batch()?;
        if batch.is_empty() {
            debug!("frontier exhausted");
            self.state = SearchState::Exhausted;
            return Ok(());
        }

        let concurrency = self.config.concurrency.max(1);
        let extractor = &self.extractor;

        // buffered() keeps the results in queue order
        let results: Vec<Result<&[DocumentId]>> = stream::iter(&batch)
            .map(move |node| node.links(extractor))
            .buffered(concurrency)
            .collect()
            .await;
        self.pages_fetched += results.iter().filter(|links| links.is_ok()).count();

        for (node, links) in batch.iter().zip(results) {
            // An error from a node queued after the one that found the
            // target never surfaces, just as if we had stopped before it
            let links = links?;
            debug!(url = %node.id(), depth = node.depth(), links = links.len(), "expanded node");

            if let Some(hops) = self.scan_links(node, links, target)? {
                debug!(hops, "target found");
                self.state = SearchState::Found(hops);
                return Ok(());
            }
        }

        Ok(())
    }

    // Takes up to `concurrency` nodes from the head of the frontier, all of
    // the same depth. An empty batch means the frontier is empty.
    fn next_batch(&mut self) -> Result<Vec<Node>> {
        let Some(depth) = self.frontier.front().map(Node::depth) else {
            return Ok(Vec::new());
        };

        if let Some(max_depth) = self.config.max_depth {
            if depth >= max_depth {
                return Err(SearchError::LimitExceeded {
                    limit: format!("max depth {}", max_depth),
                });
            }
        }

        debug_assert!(depth >= self.last_depth, "BFS depth went backwards");
        self.last_depth = depth;

        let limit = self.config.concurrency.max(1);
        let mut batch = Vec::with_capacity(limit);
        while let Some(node) = self.frontier.pop_front() {
            if node.depth() != depth {
                self.frontier.push_front(node);
                break;
            }
            batch.push(node);
            if batch.len() == limit {
                break;
            }
        }

        Ok(batch)
    }

    // Walks one node's links. Returns the distance if the target is among
    // them; otherwise queues every link not seen before.
    //
    // Once --max-visited is reached nothing more is queued, but the rest of
    // the page is still checked for the target before giving up.
    fn scan_links(
        &mut self,
        node: &Node,
        links: &[DocumentId],
        target: &DocumentId,
    ) -> Result<Option<usize>> {
        let mut visited_limit_hit = None;

        for link in links {
            if link == target {
                return Ok(Some(node.depth() + 1));
            }
            if visited_limit_hit.is_some() || self.visited.contains(link) {
                continue;
            }

            if let Some(max_visited) = self.config.max_visited {
                if self.visited.len() >= max_visited {
                    visited_limit_hit = Some(max_visited);
                    continue;
                }
            }

            self.visited.insert(link.clone());
            self.frontier.push_back(node.child(link.clone()));
        }

        match visited_limit_hit {
            Some(max_visited) => Err(SearchError::LimitExceeded {
                limit: format!("max visited {}", max_visited),
            }),
            None => Ok(None),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why VecDeque for the frontier?
//    - push_back() and pop_front() are both O(1)
//    - That gives FIFO order, which is what makes this breadth-first
//    - A Vec used as a stack would give depth-first order instead
//
// 2. Why is `visited` filled when a node is queued?
//    - Two pages in the same layer often link to the same article
//    - Marking on enqueue means the second link is skipped right away
//    - Marking on dequeue would queue (and maybe fetch) it twice
//
// 3. What does buffered(n) do?
//    - Runs up to n futures at once, like buffer_unordered(n)
//    - But yields the results in the original order
//    - We rely on that order to keep the answer identical to the
//      one-page-at-a-time search
//
// 4. Why `?` on each link list inside the loop?
//    - A failed fetch is fatal for the whole search
//    - `?` returns the SearchError to the caller right there
// -----------------------------------------------------------------------------
