//! Global site configuration.
//!
//! [`SiteSettings`] holds the authored values shared by every release
//! (theme, colors, drawer branding). [`build_site_config`] combines them with
//! a release identifier and the list of known releases into a validated
//! [`SiteConfig`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SiteError;
use crate::route::absolute_path;

/// Wildcard key of [`SiteConfig::path_colors`].
pub const WILDCARD: &str = "*";

/// Named color tokens for the UI theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub error: String,
    pub info: String,
    pub success: String,
    pub warning: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#1976D2".to_owned(),
            secondary: "#424242".to_owned(),
            accent: "#82B1FF".to_owned(),
            error: "#FF5252".to_owned(),
            info: "#2196F3".to_owned(),
            success: "#4CAF50".to_owned(),
            warning: "#FFC107".to_owned(),
        }
    }
}

impl Theme {
    fn tokens(&self) -> [(&'static str, &str); 7] {
        [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("error", &self.error),
            ("info", &self.info),
            ("success", &self.success),
            ("warning", &self.warning),
        ]
    }
}

/// Authored site-wide settings, independent of any release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteSettings {
    /// Default route path. `None` lets the bundle builder pick the first page.
    pub home: Option<String>,
    /// Theme colors.
    pub theme: Theme,
    /// Path pattern to display color. Must contain [`WILDCARD`].
    pub path_colors: BTreeMap<String, String>,
    /// Navigation drawer title.
    pub nav_title: String,
    /// Navigation drawer icon.
    pub nav_icon: Option<String>,
    /// Navigation drawer logo asset.
    pub nav_logo: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            home: None,
            theme: Theme::default(),
            path_colors: BTreeMap::from([(WILDCARD.to_owned(), "blue-grey".to_owned())]),
            nav_title: "Coherence Operator".to_owned(),
            nav_icon: None,
            nav_logo: Some("images/logo.png".to_owned()),
        }
    }
}

/// Validated global configuration for one release.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Default route path, without leading slash.
    pub home: String,
    /// Current release.
    pub release: String,
    /// All selectable releases, including `release`.
    pub releases: Vec<String>,
    /// Path pattern to display color.
    pub path_colors: BTreeMap<String, String>,
    /// Theme colors.
    pub theme: Theme,
    /// Navigation drawer title.
    pub nav_title: String,
    /// Navigation drawer icon.
    pub nav_icon: Option<String>,
    /// Navigation drawer logo asset.
    pub nav_logo: Option<String>,
}

impl SiteConfig {
    /// Absolute path of the home route.
    #[must_use]
    pub fn home_path(&self) -> String {
        absolute_path(&self.home)
    }

    /// Display color for a route path.
    ///
    /// The longest pattern that prefixes `path` wins; a trailing `*` in a
    /// pattern is ignored for matching. Falls back to the wildcard color.
    #[must_use]
    pub fn path_color(&self, path: &str) -> &str {
        self.path_colors
            .iter()
            .filter(|(pattern, _)| pattern.as_str() != WILDCARD)
            .map(|(pattern, color)| (pattern.trim_end_matches('*'), color))
            .filter(|(prefix, _)| path.starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .or_else(|| self.path_colors.get_key_value(WILDCARD).map(|(k, v)| (k.as_str(), v)))
            .map_or("", |(_, color)| color.as_str())
    }
}

/// Build the global configuration for a release.
///
/// # Errors
///
/// Returns [`SiteError::InvalidSiteConfig`] if `release` is empty or not in
/// `known_releases`, `known_releases` has duplicates, `home` is missing or
/// empty, a theme token is empty, or `path_colors` has no wildcard entry.
pub fn build_site_config(
    release: &str,
    known_releases: &[String],
    settings: &SiteSettings,
) -> Result<SiteConfig, SiteError> {
    if release.is_empty() {
        return Err(invalid("release identifier cannot be empty"));
    }
    if !known_releases.iter().any(|r| r == release) {
        return Err(invalid(format!(
            "release {release} is not in the list of known releases"
        )));
    }
    if let Some(dup) = first_duplicate(known_releases) {
        return Err(invalid(format!("release {dup} is listed more than once")));
    }
    if !settings.path_colors.contains_key(WILDCARD) {
        return Err(invalid("path colors must contain a \"*\" entry"));
    }
    if let Some((token, _)) = settings.theme.tokens().into_iter().find(|(_, v)| v.is_empty()) {
        return Err(invalid(format!("theme color {token} cannot be empty")));
    }

    let home = settings
        .home
        .as_deref()
        .map(|h| h.trim_start_matches('/'))
        .filter(|h| !h.is_empty())
        .ok_or_else(|| invalid("home route is not set"))?;

    Ok(SiteConfig {
        home: home.to_owned(),
        release: release.to_owned(),
        releases: known_releases.to_vec(),
        path_colors: settings.path_colors.clone(),
        theme: settings.theme.clone(),
        nav_title: settings.nav_title.clone(),
        nav_icon: settings.nav_icon.clone(),
        nav_logo: settings.nav_logo.clone(),
    })
}

fn invalid(message: impl Into<String>) -> SiteError {
    SiteError::InvalidSiteConfig(message.into())
}

fn first_duplicate(items: &[String]) -> Option<&str> {
    items
        .iter()
        .enumerate()
        .find(|(i, item)| items[..*i].contains(item))
        .map(|(_, item)| item.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn releases(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|&id| id.to_owned()).collect()
    }

    fn settings() -> SiteSettings {
        SiteSettings {
            home: Some("docs/about/01_overview".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_site_config_known_release() {
        let config =
            build_site_config("2.0.0", &releases(&["2.0.0", "2.0.1"]), &settings()).unwrap();

        assert_eq!(config.release, "2.0.0");
        assert_eq!(config.releases, releases(&["2.0.0", "2.0.1"]));
        assert_eq!(config.home, "docs/about/01_overview");
        assert_eq!(config.home_path(), "/docs/about/01_overview");
        assert_eq!(config.theme, Theme::default());
    }

    #[test]
    fn test_build_site_config_unknown_release_fails() {
        let err =
            build_site_config("9.9.9", &releases(&["2.0.0", "2.0.1"]), &settings()).unwrap_err();

        assert!(matches!(err, SiteError::InvalidSiteConfig(_)));
        assert!(err.to_string().contains("9.9.9"));
    }

    #[test]
    fn test_build_site_config_requires_wildcard_color() {
        let settings = SiteSettings {
            path_colors: BTreeMap::from([("/docs".to_owned(), "blue".to_owned())]),
            ..settings()
        };

        let err = build_site_config("2.0.0", &releases(&["2.0.0"]), &settings).unwrap_err();

        assert!(matches!(err, SiteError::InvalidSiteConfig(ref m) if m.contains("\"*\"")));
    }

    #[test]
    fn test_build_site_config_rejects_duplicate_releases() {
        let err =
            build_site_config("2.0.0", &releases(&["2.0.0", "2.0.0"]), &settings()).unwrap_err();

        assert!(matches!(err, SiteError::InvalidSiteConfig(ref m) if m.contains("more than once")));
    }

    #[test]
    fn test_build_site_config_rejects_empty_release() {
        let err = build_site_config("", &releases(&[""]), &settings()).unwrap_err();

        assert!(matches!(err, SiteError::InvalidSiteConfig(_)));
    }

    #[test]
    fn test_build_site_config_requires_home() {
        let settings = SiteSettings {
            home: None,
            ..Default::default()
        };

        let err = build_site_config("2.0.0", &releases(&["2.0.0"]), &settings).unwrap_err();

        assert!(matches!(err, SiteError::InvalidSiteConfig(ref m) if m.contains("home")));
    }

    #[test]
    fn test_build_site_config_rejects_empty_theme_token() {
        let settings = SiteSettings {
            theme: Theme {
                accent: String::new(),
                ..Theme::default()
            },
            ..settings()
        };

        let err = build_site_config("2.0.0", &releases(&["2.0.0"]), &settings).unwrap_err();

        assert!(matches!(err, SiteError::InvalidSiteConfig(ref m) if m.contains("accent")));
    }

    #[test]
    fn test_home_leading_slash_is_stripped() {
        let settings = SiteSettings {
            home: Some("/about/01_overview".to_owned()),
            ..Default::default()
        };

        let config = build_site_config("2.0.0", &releases(&["2.0.0"]), &settings).unwrap();

        assert_eq!(config.home, "about/01_overview");
    }

    #[test]
    fn test_path_color_longest_prefix_wins() {
        let settings = SiteSettings {
            path_colors: BTreeMap::from([
                (WILDCARD.to_owned(), "blue-grey".to_owned()),
                ("/docs/*".to_owned(), "indigo".to_owned()),
                ("/docs/about".to_owned(), "teal".to_owned()),
            ]),
            ..settings()
        };
        let config = build_site_config("2.0.0", &releases(&["2.0.0"]), &settings).unwrap();

        assert_eq!(config.path_color("/docs/about/01_overview"), "teal");
        assert_eq!(config.path_color("/docs/jvm/010_overview"), "indigo");
        assert_eq!(config.path_color("/examples/README"), "blue-grey");
    }

    #[test]
    fn test_site_config_serialization_shape() {
        let config = build_site_config("3.5.0", &releases(&["3.5.0"]), &settings()).unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["navIcon"], serde_json::Value::Null);
        assert_eq!(json["navLogo"], "images/logo.png");
        assert_eq!(json["pathColors"]["*"], "blue-grey");
        assert_eq!(json["theme"]["primary"], "#1976D2");
    }
}
