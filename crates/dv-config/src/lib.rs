//! Configuration management for dv.
//!
//! Parses `dv.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.output_dir`
//! - `site.nav_title`
//! - `site.nav_logo`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dv_site::{SiteSettings, Theme, WILDCARD};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs root directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory for generated bundles.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dv.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation tree configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Site-wide settings shared by every release.
    pub site: SiteSection,
    /// Navigation file configuration.
    pub nav: NavConfig,
    /// Metadata configuration.
    pub metadata: MetadataConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    page_extensions: Option<Vec<String>>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Root holding the `docs/` and `docs-unstable/` release trees.
    pub source_dir: PathBuf,
    /// Root that generated bundles are written under.
    pub output_dir: PathBuf,
    /// File extensions treated as pages.
    pub page_extensions: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            page_extensions: default_page_extensions(),
        }
    }
}

fn default_page_extensions() -> Vec<String> {
    vec!["js".to_owned(), "vue".to_owned()]
}

/// `[site]` section.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SiteSection {
    /// Default route path (e.g. `docs/about/01_overview`).
    pub home: Option<String>,
    /// Navigation drawer title.
    pub nav_title: Option<String>,
    /// Navigation drawer icon.
    pub nav_icon: Option<String>,
    /// Navigation drawer logo asset.
    pub nav_logo: Option<String>,
    /// Theme colors; unset tokens keep their defaults.
    pub theme: Theme,
    /// Path pattern to display color. Must contain `"*"` when set.
    pub path_colors: Option<BTreeMap<String, String>>,
}

/// `[nav]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Filename of the per-release navigation spec.
    pub filename: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            filename: "nav.yaml".to_owned(),
        }
    }
}

/// Metadata configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Filename for directory-level metadata files.
    pub name: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            name: "meta.yaml".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.nav_logo`").
        field: String,
        /// Error message (e.g., "${`DOCS_LOGO`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dv.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    ///
    /// An overridden source directory also becomes the output directory
    /// unless the output directory is overridden too.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
            if settings.output_dir.is_none() && self.docs.output_dir.is_none() {
                self.docs_resolved.output_dir.clone_from(source_dir);
            }
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Site-wide settings for the release builders.
    #[must_use]
    pub fn site_settings(&self) -> SiteSettings {
        let defaults = SiteSettings::default();
        SiteSettings {
            home: self.site.home.clone(),
            theme: self.site.theme.clone(),
            path_colors: self
                .site
                .path_colors
                .clone()
                .unwrap_or(defaults.path_colors),
            nav_title: self.site.nav_title.clone().unwrap_or(defaults.nav_title),
            nav_icon: self.site.nav_icon.clone().or(defaults.nav_icon),
            nav_logo: self.site.nav_logo.clone().or(defaults.nav_logo),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            site: SiteSection::default(),
            nav: NavConfig::default(),
            metadata: MetadataConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.to_path_buf(),
                output_dir: base.to_path_buf(),
                page_extensions: default_page_extensions(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_site()?;
        require_non_empty(&self.nav.filename, "nav.filename")?;
        require_non_empty(&self.metadata.name, "metadata.name")?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let extensions = &self.docs_resolved.page_extensions;
        if extensions.is_empty() {
            return Err(ConfigError::Validation(
                "docs.page_extensions cannot be empty".to_owned(),
            ));
        }
        if let Some(bad) = extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "docs.page_extensions entry {bad:?} must be a bare extension like \"js\""
            )));
        }
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        if let Some(colors) = &self.site.path_colors
            && !colors.contains_key(WILDCARD)
        {
            return Err(ConfigError::Validation(
                "site.path_colors must contain a \"*\" entry".to_owned(),
            ));
        }
        if let Some(title) = &self.site.nav_title {
            require_non_empty(title, "site.nav_title")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }
        if let Some(ref dir) = self.docs.output_dir {
            self.docs.output_dir = Some(expand::expand_env(dir, "docs.output_dir")?);
        }
        if let Some(ref title) = self.site.nav_title {
            self.site.nav_title = Some(expand::expand_env(title, "site.nav_title")?);
        }
        if let Some(ref logo) = self.site.nav_logo {
            self.site.nav_logo = Some(expand::expand_env(logo, "site.nav_logo")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// The output directory defaults to the source directory, so bundles land
    /// next to the pages they describe.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = config_dir.join(self.docs.source_dir.as_deref().unwrap_or("."));
        let output_dir = self
            .docs
            .output_dir
            .as_deref()
            .map_or_else(|| source_dir.clone(), |dir| config_dir.join(dir));

        self.docs_resolved = DocsConfig {
            source_dir,
            output_dir,
            page_extensions: self
                .docs
                .page_extensions
                .clone()
                .unwrap_or_else(default_page_extensions),
        };
    }
}
