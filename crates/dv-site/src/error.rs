//! Build-time validation errors.

/// Error raised while building a release's site artifacts.
///
/// Every variant is a construction-time validation failure. Callers are
/// expected to abort the release build rather than recover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteError {
    /// Two pages share the same URL path.
    #[error("duplicate page path {path} (pages {first_key} and {second_key})")]
    DuplicatePath {
        /// The shared URL path.
        path: String,
        /// Key of the page that claimed the path first.
        first_key: String,
        /// Key of the page that collided with it.
        second_key: String,
    },

    /// Two pages share the same key.
    #[error("duplicate page key {key} ({first_path} and {second_path})")]
    DuplicateKey {
        /// The shared key.
        key: String,
        /// URL path of the first page using the key.
        first_path: String,
        /// URL path of the second page using the key.
        second_path: String,
    },

    /// A page URL path is not absolute or collides with a synthesized route.
    #[error("invalid page path {path:?} for page {key}: {reason}")]
    InvalidPagePath {
        /// Key of the offending page.
        key: String,
        /// The offending path.
        path: String,
        /// Why the path was rejected.
        reason: &'static str,
    },

    /// The configured home path matches no page route.
    #[error("home route {home} does not match any page")]
    MissingHomeRoute {
        /// The home path that was requested.
        home: String,
    },

    /// Internal navigation links point to paths without a route.
    #[error("navigation links without a matching route: {}", .hrefs.join(", "))]
    DanglingNavLinks {
        /// Every offending href, in navigation order.
        hrefs: Vec<String>,
    },

    /// The requested release is not among the available ones.
    #[error("unknown release {requested} (available: {})", .available.join(", "))]
    UnknownRelease {
        /// The release that was requested.
        requested: String,
        /// Releases that could have been selected.
        available: Vec<String>,
    },

    /// The global site configuration is inconsistent.
    #[error("invalid site configuration: {0}")]
    InvalidSiteConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_links_message_lists_all_hrefs() {
        let err = SiteError::DanglingNavLinks {
            hrefs: vec!["/about/nope".to_owned(), "/install/missing".to_owned()],
        };

        assert_eq!(
            err.to_string(),
            "navigation links without a matching route: /about/nope, /install/missing"
        );
    }

    #[test]
    fn test_unknown_release_message() {
        let err = SiteError::UnknownRelease {
            requested: "9.9.9".to_owned(),
            available: vec!["2.0.0".to_owned(), "2.0.1".to_owned()],
        };

        assert_eq!(
            err.to_string(),
            "unknown release 9.9.9 (available: 2.0.0, 2.0.1)"
        );
    }
}
