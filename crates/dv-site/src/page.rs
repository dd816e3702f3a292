//! Page definitions.
//!
//! A [`PageDefinition`] is the static description of one documentation page:
//! its identity (`key`, `url_path`), the metadata copied into its route, and
//! an opaque reference to the markup payload.

use serde::{Deserialize, Serialize};

/// Route metadata for a page.
///
/// Nullable fields stay `None` rather than being coerced to empty strings:
/// the renderer skips meta tags based on null-ness specifically.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Main heading shown on the page.
    pub h1: String,
    /// Document title.
    pub title: String,
    /// Optional prefix rendered before the main heading.
    pub h1_prefix: Option<String>,
    /// Meta description.
    pub description: Option<String>,
    /// Meta keywords (comma separated, as authored).
    pub keywords: Option<String>,
    /// Layout override for the page.
    pub custom_layout: Option<String>,
    /// Whether the navigation drawer is shown.
    pub has_nav: bool,
}

impl PageMeta {
    /// Create metadata with the same heading and title and no optional fields.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            h1: title.clone(),
            title,
            h1_prefix: None,
            description: None,
            keywords: None,
            custom_layout: None,
            has_nav: true,
        }
    }
}

/// Opaque handle to a page's markup payload.
///
/// The builders never look inside it; the renderer resolves it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(pub String);

/// Static description of one documentation page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDefinition {
    /// Unique slug (e.g. `docs-about-01_overview`).
    pub key: String,
    /// Absolute URL path (e.g. `/docs/about/01_overview`).
    pub url_path: String,
    /// Metadata copied verbatim into the page's route.
    pub meta: PageMeta,
    /// Reference to the page's markup.
    pub content_ref: ContentRef,
}

impl PageDefinition {
    /// Create a page whose key is derived from its URL path.
    #[must_use]
    pub fn new(url_path: impl Into<String>, meta: PageMeta, content_ref: ContentRef) -> Self {
        let url_path = url_path.into();
        Self {
            key: Self::key_for(&url_path),
            url_path,
            meta,
            content_ref,
        }
    }

    /// Derive the canonical key for a URL path.
    ///
    /// `/docs/about/01_overview` becomes `docs-about-01_overview`.
    #[must_use]
    pub fn key_for(url_path: &str) -> String {
        url_path.trim_start_matches('/').replace('/', "-")
    }
}
