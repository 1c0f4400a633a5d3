// src/error.rs
// =============================================================================
// The error type for everything that can go wrong during a search.
//
// Every variant is fatal: the search aborts and no distance is printed.
// main.rs turns these into an "Error: ..." line on stderr and exit code 2.
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display from #[error(...)]
// - Struct-like enum variants: each error carries the data needed to explain it
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The page could not be retrieved (network failure, timeout, or a
    /// non-success HTTP status once retries are used up)
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The page was retrieved but has no content region to take links from
    #[error("failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    /// A source, target or origin that is not an absolute http(s) URL
    #[error("invalid URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    /// The HTTP client could not be set up (e.g. no TLS backend)
    #[error("could not build HTTP client: {reason}")]
    Client { reason: String },

    /// The configured content-region selector is not valid CSS
    #[error("invalid content selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// An optional --max-depth / --max-visited guard stopped the search
    #[error("search limit exceeded: {limit}")]
    LimitExceeded { limit: String },
}

// Shorthand used across the crate
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = SearchError::Fetch {
            url: "https://en.wikipedia.org/wiki/Nowhere".to_string(),
            reason: "HTTP 404 Not Found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch https://en.wikipedia.org/wiki/Nowhere: HTTP 404 Not Found"
        );
    }

    #[test]
    fn test_client_error_display() {
        let err = SearchError::Client {
            reason: "no TLS backend".to_string(),
        };
        assert_eq!(err.to_string(), "could not build HTTP client: no TLS backend");
    }

    #[test]
    fn test_limit_error_display() {
        let err = SearchError::LimitExceeded {
            limit: "max depth 3".to_string(),
        };
        assert!(err.to_string().contains("max depth 3"));
    }
}
