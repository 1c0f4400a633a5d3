// src/links/filter.rs
// =============================================================================
// Rules that decide which hrefs become graph edges.
//
// A link is kept when:
// 1. It is root-relative and starts with the internal article prefix
//    ("/wiki/" on Wikipedia)
// 2. It does not start with any prefix of the namespace denylist
//    (Category:, File:, Help:, ... pages are not articles)
//
// Kept links then have their "#fragment" removed, since "Rust#History" and
// "Rust" are the same article.
//
// The rules live in their own module, apart from any HTML parsing, so each
// one can be tested with plain strings.
// =============================================================================

// Path prefix shared by every article on the site
pub const DEFAULT_ARTICLE_PREFIX: &str = "/wiki/";

// Non-article namespaces, checked in this order
pub const DEFAULT_DENY_PREFIXES: &[&str] = &[
    "/wiki/Category:",
    "/wiki/File:",
    "/wiki/Help:",
    "/wiki/Special:",
    "/wiki/Template:",
    "/wiki/Template_talk:",
    "/wiki/User:",
    "/wiki/Wikipedia:",
];

// An ordered list of path prefixes identifying non-article pages
//
// Matching is case-sensitive and prefix-based. A prefix only matches when it
// is followed by at least one non-whitespace character: "/wiki/File:Bacon.jpg"
// is denied, while a bare "/wiki/File:" names no page in that namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDenylist {
    prefixes: Vec<String>,
}

impl NamespaceDenylist {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    // Returns the first prefix (in list order) that denies this path
    fn matching_prefix(&self, path: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|prefix| {
                path.strip_prefix(prefix.as_str())
                    .and_then(|rest| rest.chars().next())
                    .is_some_and(|c| !c.is_whitespace())
            })
            .map(String::as_str)
    }

    pub fn is_denied(&self, path: &str) -> bool {
        self.matching_prefix(path).is_some()
    }
}

impl Default for NamespaceDenylist {
    fn default() -> Self {
        Self::new(DEFAULT_DENY_PREFIXES.iter().copied())
    }
}

// Checks whether an href points at an article on this site
//
// Only root-relative links under the article prefix qualify. This rules out:
// - External sites ("https://example.com/...")
// - Same-page anchors ("#cite_note-1")
// - Protocol-relative links ("//commons.wikimedia.org/...")
// - Other paths on the same site ("/w/index.php?...")
pub fn is_internal_article(href: &str, article_prefix: &str) -> bool {
    href.starts_with(article_prefix)
}

// Removes a "#fragment" suffix, if any
pub fn strip_fragment(href: &str) -> &str {
    match href.find('#') {
        Some(index) => &href[..index],
        None => href,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_denylist_order() {
        let denylist = NamespaceDenylist::default();
        assert_eq!(denylist.prefixes().len(), 8);
        assert_eq!(denylist.prefixes()[0], "/wiki/Category:");
        assert_eq!(denylist.prefixes()[7], "/wiki/Wikipedia:");
    }

    #[test]
    fn test_denies_every_default_namespace() {
        let denylist = NamespaceDenylist::default();
        for path in [
            "/wiki/Category:American_male_film_actors",
            "/wiki/File:Kevin_Bacon_SDCC_2014.jpg",
            "/wiki/Help:Referencing_for_beginners",
            "/wiki/Special:BookSources/978-0-06-093592-6",
            "/wiki/Template:Kevin_Bacon",
            "/wiki/Template_talk:Kevin_Bacon",
            "/wiki/User:Example",
            "/wiki/Wikipedia:Verifiability",
        ] {
            assert!(denylist.is_denied(path), "{} should be denied", path);
        }
    }

    #[test]
    fn test_allows_articles() {
        let denylist = NamespaceDenylist::default();
        assert!(!denylist.is_denied("/wiki/Kevin_Bacon"));
        assert!(!denylist.is_denied("/wiki/Footloose_(1984_film)"));
        // "Talk:" is not in the default list
        assert!(!denylist.is_denied("/wiki/Talk:Kevin_Bacon"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let denylist = NamespaceDenylist::default();
        assert!(!denylist.is_denied("/wiki/category:Actors"));
        assert!(!denylist.is_denied("/wiki/FILE:Bacon.jpg"));
    }

    #[test]
    fn test_bare_prefix_is_not_denied() {
        let denylist = NamespaceDenylist::default();
        assert!(!denylist.is_denied("/wiki/Category:"));
        assert!(!denylist.is_denied("/wiki/Category: Actors"));
    }

    #[test]
    fn test_first_matching_prefix_wins() {
        let denylist = NamespaceDenylist::new(["/wiki/Template", "/wiki/Template_talk:"]);
        assert_eq!(
            denylist.matching_prefix("/wiki/Template_talk:Foo"),
            Some("/wiki/Template")
        );
    }

    #[test]
    fn test_custom_denylist() {
        let denylist = NamespaceDenylist::new(vec!["/wiki/Portal:".to_string()]);
        assert!(denylist.is_denied("/wiki/Portal:Film"));
        assert!(!denylist.is_denied("/wiki/Category:Film"));
    }

    #[test]
    fn test_internal_article() {
        assert!(is_internal_article("/wiki/Minnesota", "/wiki/"));
        assert!(!is_internal_article("https://en.wikipedia.org/wiki/Minnesota", "/wiki/"));
        assert!(!is_internal_article("//en.wikipedia.org/wiki/Minnesota", "/wiki/"));
        assert!(!is_internal_article("#cite_note-1", "/wiki/"));
        assert!(!is_internal_article("/w/index.php?title=Minnesota", "/wiki/"));
    }

    #[test]
    fn test_strip_fragment() {
        assert_eq!(strip_fragment("/wiki/Rust#History"), "/wiki/Rust");
        assert_eq!(strip_fragment("/wiki/Rust#"), "/wiki/Rust");
        assert_eq!(strip_fragment("/wiki/Rust"), "/wiki/Rust");
    }
}
