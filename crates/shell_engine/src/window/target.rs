//! Navigation target resolution
//!
//! A window loads one bundled page; the page itself is told where to
//! navigate through query parameters appended to its locator. Resolution is
//! a pure merge: base locator in, overrides in, loadable target out.

use std::fmt;

/// Identifier of a bundled page the shell can load into a window
///
/// The set is fixed at compile time; the platform maps each identifier onto
/// the matching bundled resource. Grows a variant per shipped panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// The embedded browser panel page
    Browser,
}

impl Page {
    /// Stable string identifier handed to the platform loader
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied overrides merged into a navigation target
///
/// `url` is the logical destination the hosted page should navigate to
/// internally; an empty string is valid and means "show the default view".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationOverrides {
    /// Logical destination for the hosted page
    pub url: String,
}

/// Resolved locator plus query parameters used to load content into a window
///
/// Produced once by [`resolve`], consumed once at load time. Not mutated
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    base_locator: String,
    query: Vec<(String, String)>,
}

impl NavigationTarget {
    /// The base page locator the target was resolved from
    #[must_use]
    pub fn base_locator(&self) -> &str {
        &self.base_locator
    }

    /// Look up a query parameter by key
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render the query parameters as a `k=v&k2=v2` string
    ///
    /// Values are appended verbatim; callers own any percent-encoding, so a
    /// value that was already encoded is never encoded a second time.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Render the full loadable locator, `base?query`
    ///
    /// No `?` is appended when the query is empty.
    #[must_use]
    pub fn locator(&self) -> String {
        if self.query.is_empty() {
            self.base_locator.clone()
        } else {
            format!("{}?{}", self.base_locator, self.query_string())
        }
    }
}

/// Merge a base page locator with caller overrides into a loadable target
///
/// Pure: neither input is mutated and no side effects occur. The override
/// values land in the query untouched; an empty `url` override still yields
/// a valid target with an empty `url` query value.
#[must_use]
pub fn resolve(base_locator: &str, overrides: &NavigationOverrides) -> NavigationTarget {
    NavigationTarget {
        base_locator: base_locator.to_string(),
        query: vec![("url".to_string(), overrides.url.clone())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_survives_merge_unmodified() {
        let overrides = NavigationOverrides { url: "foo/bar?x=1".to_string() };
        let target = resolve("pages/browser.html", &overrides);
        assert_eq!(target.query_value("url"), Some("foo/bar?x=1"));
        // Inputs are untouched.
        assert_eq!(overrides.url, "foo/bar?x=1");
    }

    #[test]
    fn test_empty_url_still_yields_valid_target() {
        let target = resolve("pages/browser.html", &NavigationOverrides::default());
        assert_eq!(target.query_value("url"), Some(""));
        assert_eq!(target.locator(), "pages/browser.html?url=");
    }

    #[test]
    fn test_locator_rendering() {
        let overrides = NavigationOverrides { url: "https://example.org".to_string() };
        let target = resolve("pages/browser.html", &overrides);
        assert_eq!(target.base_locator(), "pages/browser.html");
        assert_eq!(target.locator(), "pages/browser.html?url=https://example.org");
    }

    #[test]
    fn test_unknown_query_key_is_absent() {
        let target = resolve("pages/browser.html", &NavigationOverrides::default());
        assert_eq!(target.query_value("token"), None);
    }

    #[test]
    fn test_page_identifiers() {
        assert_eq!(Page::Browser.as_str(), "browser");
        assert_eq!(Page::Browser.to_string(), "browser");
    }
}
