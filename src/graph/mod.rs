// src/graph/mod.rs
// =============================================================================
// This module holds the article graph and the breadth-first search over it.
//
// The graph is never built up front. A node's edges are only known once its
// page has been fetched, so the search discovers the graph as it goes.
//
// Submodules:
// - document: DocumentId, the canonical URL of an article
// - node: a vertex (id + depth) with a lazily fetched link list
// - search: the SearchController that runs the BFS
// =============================================================================

mod document;
mod node;
mod search;

pub use document::DocumentId;
pub use node::Node;
pub use search::{SearchConfig, SearchController, SearchOutcome, SearchReport, DEFAULT_TARGET};
