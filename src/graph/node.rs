// src/graph/node.rs
// =============================================================================
// A vertex of the article graph.
//
// A Node knows its id and its BFS depth (distance from the source article).
// Its outgoing links are fetched the first time they are asked for and cached
// in the node from then on, so a page is never downloaded twice for the same
// node.
// =============================================================================

use tokio::sync::OnceCell;

use super::DocumentId;
use crate::error::Result;
use crate::links::LinkExtractor;

#[derive(Debug)]
pub struct Node {
    id: DocumentId,
    depth: usize,
    // Filled in once by links(); a failed fetch leaves it empty
    links: OnceCell<Vec<DocumentId>>,
}

impl Node {
    pub fn new(id: DocumentId, depth: usize) -> Self {
        Self {
            id,
            depth,
            links: OnceCell::new(),
        }
    }

    // The node a search starts from (depth 0)
    pub fn source(id: DocumentId) -> Self {
        Self::new(id, 0)
    }

    // A node one hop further from the source than this one
    pub fn child(&self, id: DocumentId) -> Self {
        Self::new(id, self.depth + 1)
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    // Outgoing article links, fetched on the first call and cached after
    pub async fn links(&self, extractor: &LinkExtractor) -> Result<&[DocumentId]> {
        self.links
            .get_or_try_init(|| extractor.extract(&self.id))
            .await
            .map(Vec::as_slice)
    }
}
