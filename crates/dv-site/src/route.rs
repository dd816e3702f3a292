//! Route table construction.
//!
//! Routes are an ordered sequence: client routers pick the first match, so
//! page routes come first, then the root redirect, then the catch-all.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer};

use crate::error::SiteError;
use crate::page::{PageDefinition, PageMeta};

/// Path of the synthesized root redirect.
pub const ROOT_PATH: &str = "/";

/// Path of the synthesized catch-all redirect.
pub const CATCH_ALL_PATH: &str = "*";

/// Lazy-loading reference to a page component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRef {
    /// Page key.
    pub key: String,
    /// Page URL path.
    pub url_path: String,
    /// Extra parameters passed to the loader (empty by default).
    pub params: BTreeMap<String, String>,
}

impl ComponentRef {
    fn for_page(page: &PageDefinition) -> Self {
        Self {
            key: page.key.clone(),
            url_path: page.url_path.clone(),
            params: BTreeMap::new(),
        }
    }
}

/// What a route resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RouteTarget {
    /// A renderable page.
    Page {
        /// Metadata copied from the page definition.
        meta: PageMeta,
        /// Component loader reference.
        component: ComponentRef,
    },
    /// A redirect to another path.
    Redirect {
        /// Target path.
        redirect: String,
    },
}

/// A URL path mapped to a page component or a redirect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Route path (a page URL path, `/`, or `*`).
    pub path: String,
    /// Page or redirect target.
    #[serde(flatten)]
    pub target: RouteTarget,
}

impl Route {
    fn page(page: &PageDefinition) -> Self {
        Self {
            path: page.url_path.clone(),
            target: RouteTarget::Page {
                meta: page.meta.clone(),
                component: ComponentRef::for_page(page),
            },
        }
    }

    fn redirect(path: &str, target: &str) -> Self {
        Self {
            path: path.to_owned(),
            target: RouteTarget::Redirect {
                redirect: target.to_owned(),
            },
        }
    }

    /// Whether this route redirects instead of rendering a page.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect { .. })
    }

    /// Page metadata, for page routes.
    #[must_use]
    pub fn meta(&self) -> Option<&PageMeta> {
        match &self.target {
            RouteTarget::Page { meta, .. } => Some(meta),
            RouteTarget::Redirect { .. } => None,
        }
    }

    /// Component reference, for page routes.
    #[must_use]
    pub fn component(&self) -> Option<&ComponentRef> {
        match &self.target {
            RouteTarget::Page { component, .. } => Some(component),
            RouteTarget::Redirect { .. } => None,
        }
    }

    /// Redirect target, for redirect routes.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::Page { .. } => None,
            RouteTarget::Redirect { redirect } => Some(redirect),
        }
    }
}

/// Ordered route list with O(1) path lookups.
#[derive(Clone, Debug)]
pub struct RouteTable {
    routes: Vec<Route>,
    path_index: HashMap<String, usize>,
}

impl RouteTable {
    fn new(routes: Vec<Route>) -> Self {
        let path_index = routes
            .iter()
            .enumerate()
            .map(|(i, route)| (route.path.clone(), i))
            .collect();
        Self { routes, path_index }
    }

    /// Look up a route by exact path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Route> {
        self.path_index.get(path).map(|&i| &self.routes[i])
    }

    /// Page routes in authored order (redirects excluded).
    pub fn page_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|r| !r.is_redirect())
    }

    /// Target of the root redirect.
    #[must_use]
    pub fn home(&self) -> Option<&str> {
        self.get(ROOT_PATH).and_then(Route::redirect_target)
    }

    /// All routes in match order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Iterate routes in match order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    /// Number of routes, including the two synthesized redirects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes. Built tables never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl PartialEq for RouteTable {
    fn eq(&self, other: &Self) -> bool {
        self.routes == other.routes
    }
}

impl Eq for RouteTable {}

impl Serialize for RouteTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.routes)
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

/// Normalize a home path to an absolute route path.
///
/// The deployed configs store home without the leading slash
/// (`docs/about/01_overview`), routes always carry it.
#[must_use]
pub fn absolute_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Build the route table for a release.
///
/// Emits one route per page in input order, then a root redirect to
/// `home_path`, then a catch-all redirect to the root.
///
/// # Errors
///
/// - [`SiteError::InvalidPagePath`] if a page path is not absolute or is `/` or `*`
/// - [`SiteError::DuplicatePath`] if two pages share a URL path
/// - [`SiteError::DuplicateKey`] if two pages share a key
/// - [`SiteError::MissingHomeRoute`] if `home_path` matches no page
pub fn build_routes(pages: &[PageDefinition], home_path: &str) -> Result<RouteTable, SiteError> {
    let mut by_path: HashMap<&str, &str> = HashMap::with_capacity(pages.len());
    let mut by_key: HashMap<&str, &str> = HashMap::with_capacity(pages.len());

    for page in pages {
        validate_page_path(page)?;

        if let Some(first_key) = by_path.insert(&page.url_path, &page.key) {
            return Err(SiteError::DuplicatePath {
                path: page.url_path.clone(),
                first_key: first_key.to_owned(),
                second_key: page.key.clone(),
            });
        }
        if let Some(first_path) = by_key.insert(&page.key, &page.url_path) {
            return Err(SiteError::DuplicateKey {
                key: page.key.clone(),
                first_path: first_path.to_owned(),
                second_path: page.url_path.clone(),
            });
        }
    }

    let home = absolute_path(home_path);
    if !by_path.contains_key(home.as_str()) {
        return Err(SiteError::MissingHomeRoute { home });
    }

    let mut routes = Vec::with_capacity(pages.len() + 2);
    routes.extend(pages.iter().map(Route::page));
    routes.push(Route::redirect(ROOT_PATH, &home));
    routes.push(Route::redirect(CATCH_ALL_PATH, ROOT_PATH));

    tracing::debug!(pages = pages.len(), home = %home, "Built route table");

    Ok(RouteTable::new(routes))
}

fn validate_page_path(page: &PageDefinition) -> Result<(), SiteError> {
    let reason = if page.url_path == CATCH_ALL_PATH {
        "* is reserved for the catch-all redirect"
    } else if !page.url_path.starts_with('/') {
        "must start with /"
    } else if page.url_path == ROOT_PATH {
        "/ is reserved for the home redirect"
    } else {
        return Ok(());
    };

    Err(SiteError::InvalidPagePath {
        key: page.key.clone(),
        path: page.url_path.clone(),
        reason,
    })
}
