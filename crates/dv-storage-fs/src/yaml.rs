//! YAML parsing for page sidecars, directory metadata and release overrides.

use std::collections::BTreeMap;

use dv_site::SiteSettings;
use serde::Deserialize;

/// Metadata fields from a page sidecar or a directory `meta.yaml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct PageFields {
    pub title: Option<String>,
    pub h1: Option<String>,
    pub h1_prefix: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub custom_layout: Option<String>,
    pub has_nav: Option<bool>,
}

/// Parse metadata fields from YAML content.
///
/// Empty content yields the default (all fields unset).
///
/// # Errors
///
/// Returns an error if the YAML is malformed.
pub(crate) fn parse_page_fields(content: &str) -> Result<PageFields, serde_yaml::Error> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(PageFields::default());
    }
    serde_yaml::from_str(trimmed)
}

/// Per-release overrides from `<release>/site.yaml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SiteOverrides {
    /// Declared release id when it differs from the directory name.
    pub release: Option<String>,
    pub home: Option<String>,
    pub nav_title: Option<String>,
    pub nav_icon: Option<String>,
    pub nav_logo: Option<String>,
    pub path_colors: Option<BTreeMap<String, String>>,
}

impl SiteOverrides {
    /// Merge over `base`; set fields win. `release` is not a setting and is ignored.
    pub fn apply(self, base: &SiteSettings) -> SiteSettings {
        let mut settings = base.clone();
        if self.home.is_some() {
            settings.home = self.home;
        }
        if let Some(title) = self.nav_title {
            settings.nav_title = title;
        }
        if self.nav_icon.is_some() {
            settings.nav_icon = self.nav_icon;
        }
        if self.nav_logo.is_some() {
            settings.nav_logo = self.nav_logo;
        }
        if let Some(colors) = self.path_colors {
            settings.path_colors = colors;
        }
        settings
    }
}

/// Parse release overrides; empty content overrides nothing.
pub(crate) fn parse_site_overrides(content: &str) -> Result<SiteOverrides, serde_yaml::Error> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(SiteOverrides::default());
    }
    serde_yaml::from_str(trimmed)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_page_fields_all() {
        let yaml = r#"
title: "Install Using Helm"
h1: Helm
h1_prefix: "Step 2:"
description: |
  Installing the operator
  with Helm
keywords: oracle coherence, kubernetes, helm
custom_layout: wide
has_nav: false
"#;
        let fields = parse_page_fields(yaml).unwrap();

        assert_eq!(fields.title.as_deref(), Some("Install Using Helm"));
        assert_eq!(fields.h1.as_deref(), Some("Helm"));
        assert_eq!(fields.h1_prefix.as_deref(), Some("Step 2:"));
        assert_eq!(
            fields.description.as_deref(),
            Some("Installing the operator\nwith Helm")
        );
        assert_eq!(
            fields.keywords.as_deref(),
            Some("oracle coherence, kubernetes, helm")
        );
        assert_eq!(fields.custom_layout.as_deref(), Some("wide"));
        assert_eq!(fields.has_nav, Some(false));
    }

    #[test]
    fn test_parse_page_fields_empty() {
        assert_eq!(parse_page_fields("").unwrap(), PageFields::default());
        assert_eq!(parse_page_fields("  \n\t ").unwrap(), PageFields::default());
    }

    #[test]
    fn test_parse_page_fields_invalid_yaml() {
        assert!(parse_page_fields("title: [invalid yaml").is_err());
    }

    #[test]
    fn test_site_overrides_apply() {
        let overrides =
            parse_site_overrides("home: docs/about/02_introduction\nnav_title: Legacy Docs\n")
                .unwrap();

        let settings = overrides.apply(&SiteSettings::default());

        assert_eq!(settings.home.as_deref(), Some("docs/about/02_introduction"));
        assert_eq!(settings.nav_title, "Legacy Docs");
        assert_eq!(settings.nav_logo, SiteSettings::default().nav_logo);
        assert_eq!(settings.path_colors, SiteSettings::default().path_colors);
    }

    #[test]
    fn test_site_overrides_replace_path_colors() {
        let yaml = "path_colors:\n  \"*\": indigo\n  /docs: teal\n";
        let settings = parse_site_overrides(yaml)
            .unwrap()
            .apply(&SiteSettings::default());

        assert_eq!(settings.path_colors.len(), 2);
        assert_eq!(settings.path_colors["/docs"], "teal");
    }

    #[test]
    fn test_empty_overrides_keep_base() {
        let base = SiteSettings::default();
        assert_eq!(parse_site_overrides("").unwrap().apply(&base), base);
    }
}
