// src/graph/document.rs
// =============================================================================
// DocumentId: the identity of a node in the article graph.
//
// A DocumentId is an absolute http(s) URL with the fragment removed, so
// "https://en.wikipedia.org/wiki/Rust#History" and
// "https://en.wikipedia.org/wiki/Rust" are the same article.
//
// Two ids are equal exactly when their canonical string forms are equal.
// The url crate normalizes the string when parsing (lowercase scheme and
// host, "/" path for a bare origin, etc.), which gives us that canonical form.
// =============================================================================

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Result, SearchError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Url);

impl DocumentId {
    // Parses an absolute URL given by the user (source or target article)
    //
    // Relative URLs and non-web schemes (mailto:, file:, ...) are rejected.
    // Any #fragment is dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input.trim()).map_err(|e| SearchError::InvalidUrl {
            input: input.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(url, input)
    }

    // Resolves a root-relative link ("/wiki/Foo") against the site origin
    pub fn resolve(origin: &Url, path: &str) -> Result<Self> {
        let url = origin.join(path).map_err(|e| SearchError::InvalidUrl {
            input: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_url(url, path)
    }

    fn from_url(mut url: Url, input: &str) -> Result<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(SearchError::InvalidUrl {
                input: input.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if url.host_str().is_none() {
            return Err(SearchError::InvalidUrl {
                input: input.to_string(),
                reason: "URL has no host".to_string(),
            });
        }

        url.set_fragment(None);
        Ok(DocumentId(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentId {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        DocumentId::parse(s)
    }
}
