//! Per-release site artifacts for doc-view documentation sites.
//!
//! This crate provides:
//! - [`build_site_config`]: global configuration (theme, colors, releases)
//! - [`build_routes`]: the ordered route table, with root and catch-all redirects
//! - [`build_nav_tree`]: the navigation drawer, cross-checked against the routes
//! - [`ReleaseBundle`] and [`ReleaseCatalog`]: built releases and release selection
//! - [`render_config_js`]: the `config.js` module consumed by the front end
//!
//! Everything here is pure: inputs are already in memory and every artifact
//! is immutable once built.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), dv_site::SiteError> {
//! use dv_site::{
//!     ContentRef, LinkSpec, NavGroupSpec, PageDefinition, PageMeta, ReleaseBundle, SiteSettings,
//! };
//!
//! let pages = vec![PageDefinition::new(
//!     "/about/01_overview",
//!     PageMeta::titled("Overview"),
//!     ContentRef("pages/about/01_overview.js".to_owned()),
//! )];
//! let nav = vec![NavGroupSpec::group(
//!     "About",
//!     "assistant",
//!     "/about",
//!     vec![LinkSpec::internal("/about/01_overview", "Overview")],
//! )];
//! let settings = SiteSettings {
//!     home: Some("about/01_overview".to_owned()),
//!     ..Default::default()
//! };
//!
//! let bundle = ReleaseBundle::build("3.5.0", &["3.5.0".to_owned()], &settings, &pages, &nav)?;
//! assert_eq!(bundle.routes.len(), 3);
//! # Ok(())
//! # }
//! ```

mod bundle;
mod config_js;
mod error;
mod nav;
mod page;
mod release;
mod route;
mod site_config;

pub use bundle::ReleaseBundle;
pub use config_js::render_config_js;
pub use error::SiteError;
pub use nav::{
    BLANK_TARGET, GroupNode, LinkNode, LinkSpec, NavGroupSpec, NavNode, NavTree, PrefixMismatch,
    build_nav_tree,
};
pub use page::{ContentRef, PageDefinition, PageMeta};
pub use release::{
    Channel, ReleaseCatalog, compare_release_ids, resolve_release, sort_releases,
};
pub use route::{
    CATCH_ALL_PATH, ComponentRef, ROOT_PATH, Route, RouteTable, RouteTarget, absolute_path,
    build_routes,
};
pub use site_config::{SiteConfig, SiteSettings, Theme, WILDCARD, build_site_config};
