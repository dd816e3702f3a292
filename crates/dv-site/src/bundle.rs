//! Release bundles.
//!
//! A [`ReleaseBundle`] holds the three artifacts built for one release. It
//! only exists fully built: construction either yields every artifact or
//! fails with the first validation error.

use serde::Serialize;

use crate::error::SiteError;
use crate::nav::{NavGroupSpec, NavTree, build_nav_tree};
use crate::page::PageDefinition;
use crate::route::{RouteTable, build_routes};
use crate::site_config::{SiteConfig, SiteSettings, build_site_config};

/// Immutable site artifacts for one release.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReleaseBundle {
    /// Global configuration.
    pub config: SiteConfig,
    /// Router table.
    pub routes: RouteTable,
    /// Navigation drawer tree.
    pub nav: NavTree,
}

impl ReleaseBundle {
    /// Build every artifact for a release.
    ///
    /// When `settings.home` is unset, the first page becomes the home route.
    ///
    /// # Errors
    ///
    /// Propagates the first failure of [`build_site_config`],
    /// [`build_routes`], or [`build_nav_tree`].
    pub fn build(
        release: &str,
        known_releases: &[String],
        settings: &SiteSettings,
        pages: &[PageDefinition],
        nav_specs: &[NavGroupSpec],
    ) -> Result<Self, SiteError> {
        let config = if settings.home.is_some() {
            build_site_config(release, known_releases, settings)?
        } else {
            let first = pages
                .first()
                .ok_or_else(|| SiteError::InvalidSiteConfig("release has no pages".to_owned()))?;
            tracing::debug!(release, home = %first.url_path, "No home configured, using first page");
            let settings = SiteSettings {
                home: Some(first.url_path.clone()),
                ..settings.clone()
            };
            build_site_config(release, known_releases, &settings)?
        };

        let routes = build_routes(pages, &config.home_path())?;
        let nav = build_nav_tree(nav_specs, &routes)?;

        tracing::debug!(
            release,
            routes = routes.len(),
            nav = nav.len(),
            "Built release bundle"
        );

        Ok(Self {
            config,
            routes,
            nav,
        })
    }
}
