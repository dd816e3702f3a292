//! Filesystem source for dv documentation releases.
//!
//! This crate provides [`FsSource`], which reads release trees laid out as
//!
//! ```text
//! <root>/docs/<release>/pages/**/<NNN_name>.js
//! <root>/docs/<release>/nav.yaml
//! <root>/docs/<release>/site.yaml
//! <root>/docs-unstable/<release>/...
//! ```
//!
//! and produces the page definitions, navigation specs and site settings the
//! [`dv_site`] builders consume. It handles:
//!
//! - Release discovery per [`Channel`], honoring a `release` id declared in
//!   `site.yaml` (e.g. `docs/snapshot` publishing `3.4.1`)
//! - Recursive page scanning with sorted, deterministic output
//! - Title extraction from the first `<h1>` with filename fallback
//! - Metadata loading from YAML sidecars with directory inheritance
//!
//! # Example
//!
//! ```ignore
//! use dv_site::{ReleaseBundle, SiteSettings};
//! use dv_storage_fs::FsSource;
//!
//! let source = FsSource::new("site".into());
//! for release in source.discover_releases()? {
//!     let loaded = source.load_release(release.channel, &release.dir_name, &SiteSettings::default())?;
//!     println!("{}: {} pages", release.release, loaded.pages.len());
//! }
//! ```

mod error;
mod inheritance;
mod scanner;
mod yaml;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use dv_site::{
    Channel, ContentRef, NavGroupSpec, PageDefinition, PageMeta, SiteSettings, compare_release_ids,
};
use regex::Regex;

pub use error::SourceError;
use inheritance::{build_ancestor_chain, merge_metadata};
use scanner::{PageRef, Scanner};
use yaml::{PageFields, SiteOverrides, parse_page_fields, parse_site_overrides};

/// First `<h1>` element in page markup.
static H1_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").unwrap());

/// Any markup tag, for flattening heading contents.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Numeric ordering prefix on page file names (e.g. `012_`).
static ORDER_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+_").unwrap());

/// Directory holding a release's pages.
const PAGES_DIR: &str = "pages";

/// Default metadata filename.
const DEFAULT_META_FILENAME: &str = "meta.yaml";

/// Default navigation spec filename.
const DEFAULT_NAV_FILENAME: &str = "nav.yaml";

/// Per-release site override filename.
const SITE_OVERRIDES_FILENAME: &str = "site.yaml";

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of each word.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Title derived from a page file stem, without its ordering prefix.
///
/// `012_install_helm` → `Install Helm`
fn title_from_stem(stem: &str) -> String {
    let slug = ORDER_PREFIX.replace(stem, "");
    match titlecase_from_slug(&slug) {
        title if title.is_empty() => titlecase_from_slug(stem),
        title => title,
    }
}

/// Text of the first `<h1>` in `markup`, with nested tags removed.
fn extract_h1(markup: &str) -> Option<String> {
    let caps = H1_PATTERN.captures(markup)?;
    let text = TAG_PATTERN.replace_all(&caps[1], "");
    let title = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// A release directory found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseDir {
    /// Channel the release is published under.
    pub channel: Channel,
    /// Directory name under the channel directory.
    pub dir_name: String,
    /// Release identifier: the `release` declared in `site.yaml`, or the
    /// directory name.
    pub release: String,
}

impl fmt::Display for ReleaseDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.channel, self.release)?;
        if self.dir_name != self.release {
            write!(f, " ({})", self.dir_name)?;
        }
        Ok(())
    }
}

/// Everything read from one release directory.
#[derive(Clone, Debug)]
pub struct ReleaseSource {
    /// Release identifier, see [`ReleaseDir::release`].
    pub release: String,
    /// Pages in discovery order.
    pub pages: Vec<PageDefinition>,
    /// Authored navigation entries.
    pub nav: Vec<NavGroupSpec>,
    /// Site settings with the release's `site.yaml` applied.
    pub settings: SiteSettings,
}

/// Filesystem source of documentation releases.
#[derive(Debug)]
pub struct FsSource {
    /// Root holding the channel directories.
    root: PathBuf,
    /// Bare extensions treated as pages.
    page_extensions: Vec<String>,
    /// Directory metadata file name (e.g., "meta.yaml").
    meta_filename: String,
    /// Navigation spec file name (e.g., "nav.yaml").
    nav_filename: String,
}

impl FsSource {
    /// Create a source with default extensions (`js`, `vue`) and filenames.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            page_extensions: vec!["js".to_owned(), "vue".to_owned()],
            meta_filename: DEFAULT_META_FILENAME.to_owned(),
            nav_filename: DEFAULT_NAV_FILENAME.to_owned(),
        }
    }

    /// Use custom page extensions.
    #[must_use]
    pub fn with_page_extensions(mut self, extensions: Vec<String>) -> Self {
        self.page_extensions = extensions;
        self
    }

    /// Use a custom directory metadata filename.
    #[must_use]
    pub fn with_meta_filename(mut self, filename: impl Into<String>) -> Self {
        self.meta_filename = filename.into();
        self
    }

    /// Use a custom navigation spec filename.
    #[must_use]
    pub fn with_nav_filename(mut self, filename: impl Into<String>) -> Self {
        self.nav_filename = filename.into();
        self
    }

    /// Root directory of this source.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find all releases, stable channel first, each channel in natural
    /// order of release id.
    ///
    /// Missing channel directories contribute no releases. Directories
    /// without a `pages/` directory are skipped. A `site.yaml` that cannot be
    /// read here leaves the directory name as the release id; loading the
    /// release reports the error.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if a channel directory exists but cannot be read.
    pub fn discover_releases(&self) -> Result<Vec<ReleaseDir>, SourceError> {
        let mut found = Vec::new();
        for channel in Channel::ALL {
            let mut releases: Vec<ReleaseDir> = self
                .channel_releases(channel)?
                .into_iter()
                .map(|dir_name| {
                    let release = self
                        .declared_release(channel, &dir_name)
                        .unwrap_or_else(|| dir_name.clone());
                    ReleaseDir {
                        channel,
                        dir_name,
                        release,
                    }
                })
                .collect();
            releases.sort_by(|a, b| {
                compare_release_ids(&a.release, &b.release)
                    .then_with(|| compare_release_ids(&a.dir_name, &b.dir_name))
            });
            found.extend(releases);
        }
        Ok(found)
    }

    /// Release id declared in a release directory's `site.yaml`, if any.
    fn declared_release(&self, channel: Channel, dir_name: &str) -> Option<String> {
        let release_dir = self.release_path(channel, dir_name);
        Self::load_site_overrides(&release_dir)
            .inspect_err(|e| {
                tracing::warn!(%channel, dir = dir_name, error = %e, "Cannot read release id, using directory name");
            })
            .ok()
            .flatten()
            .and_then(|overrides| overrides.release)
    }

    /// Release names of one channel, unsorted.
    fn channel_releases(&self, channel: Channel) -> Result<Vec<String>, SourceError> {
        let channel_dir = self.root.join(channel.dir_name());
        if !channel_dir.is_dir() {
            tracing::debug!(path = %channel_dir.display(), "Channel directory missing");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&channel_dir).map_err(|e| SourceError::io(&channel_dir, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SourceError::io(&channel_dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if entry.path().join(PAGES_DIR).is_dir() {
                names.push(name);
            } else {
                tracing::debug!(%channel, release = %name, "No pages directory, skipping");
            }
        }
        Ok(names)
    }

    fn release_path(&self, channel: Channel, dir_name: &str) -> PathBuf {
        self.root.join(channel.dir_name()).join(dir_name)
    }

    /// Read pages, navigation and site overrides of the release stored in
    /// `dir_name`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::MissingRelease`] if the release has no `pages/`
    /// directory, [`SourceError::Yaml`] for a malformed nav or `site.yaml`,
    /// and [`SourceError::Io`] for unreadable files.
    pub fn load_release(
        &self,
        channel: Channel,
        dir_name: &str,
        base: &SiteSettings,
    ) -> Result<ReleaseSource, SourceError> {
        let release_dir = self.release_path(channel, dir_name);
        let pages_dir = release_dir.join(PAGES_DIR);
        if !pages_dir.is_dir() {
            return Err(SourceError::MissingRelease {
                channel,
                release: dir_name.to_owned(),
                path: pages_dir,
            });
        }

        let mut overrides = Self::load_site_overrides(&release_dir)?.unwrap_or_default();
        let release = overrides
            .release
            .take()
            .unwrap_or_else(|| dir_name.to_owned());
        let settings = overrides.apply(base);
        let pages = self.load_pages(&release_dir)?;
        let nav = self.load_nav(&release_dir)?;

        tracing::debug!(
            %channel,
            dir = dir_name,
            %release,
            pages = pages.len(),
            nav_entries = nav.len(),
            "Loaded release"
        );

        Ok(ReleaseSource {
            release,
            pages,
            nav,
            settings,
        })
    }

    /// Parse `<release>/site.yaml`; `None` when the file does not exist.
    fn load_site_overrides(release_dir: &Path) -> Result<Option<SiteOverrides>, SourceError> {
        let path = release_dir.join(SITE_OVERRIDES_FILENAME);
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };
        parse_site_overrides(&content)
            .map(Some)
            .map_err(|source| SourceError::Yaml { path, source })
    }

    /// Read the authored navigation spec. A missing file yields an empty nav.
    fn load_nav(&self, release_dir: &Path) -> Result<Vec<NavGroupSpec>, SourceError> {
        let path = release_dir.join(&self.nav_filename);
        let Some(content) = read_optional(&path)? else {
            tracing::debug!(path = %path.display(), "No navigation file");
            return Ok(Vec::new());
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_yaml::from_str(&content).map_err(|source| SourceError::Yaml { path, source })
    }

    /// Scan `pages/` and build a definition for every page file.
    fn load_pages(&self, release_dir: &Path) -> Result<Vec<PageDefinition>, SourceError> {
        let pages_dir = release_dir.join(PAGES_DIR);
        let refs = Scanner::new(pages_dir.clone(), self.page_extensions.clone()).scan();

        let mut dir_meta: HashMap<String, PageFields> = HashMap::new();
        refs.iter()
            .map(|page_ref| {
                let inherited = build_ancestor_chain(&page_ref.dir).iter().fold(
                    PageFields::default(),
                    |acc, ancestor| {
                        let meta = dir_meta
                            .entry(ancestor.clone())
                            .or_insert_with(|| self.load_dir_meta(&pages_dir, ancestor));
                        merge_metadata(&acc, meta)
                    },
                );
                build_page(release_dir, page_ref, &inherited)
            })
            .collect()
    }

    /// Load and parse a directory's metadata file.
    ///
    /// Returns the default (nothing set) if no file exists or it fails to parse.
    fn load_dir_meta(&self, pages_dir: &Path, dir: &str) -> PageFields {
        let path = pages_dir.join(dir).join(&self.meta_filename);
        if !path.is_file() {
            return PageFields::default();
        }
        load_fields_or_default(&path)
    }
}

/// Read a file, treating "not found" as absent.
fn read_optional(path: &Path) -> Result<Option<String>, SourceError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SourceError::io(path, e)),
    }
}

/// Parse a metadata file, logging and skipping anything unreadable.
fn load_fields_or_default(path: &Path) -> PageFields {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read metadata file, skipping");
            return PageFields::default();
        }
    };
    parse_page_fields(&content)
        .inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse metadata, skipping");
        })
        .unwrap_or_default()
}

/// Build a page definition from its scanned files and inherited metadata.
fn build_page(
    release_dir: &Path,
    page_ref: &PageRef,
    inherited: &PageFields,
) -> Result<PageDefinition, SourceError> {
    let own = page_ref
        .sidecar_path
        .as_deref()
        .map(load_fields_or_default)
        .unwrap_or_default();
    let fields = merge_metadata(inherited, &own);

    let title = match fields.title {
        Some(title) => title,
        None => {
            let markup = fs::read_to_string(&page_ref.content_path)
                .map_err(|e| SourceError::io(&page_ref.content_path, e))?;
            extract_h1(&markup).unwrap_or_else(|| {
                let stem = page_ref
                    .url_path
                    .rsplit_once('/')
                    .map_or(page_ref.url_path.as_str(), |(_, stem)| stem);
                title_from_stem(stem)
            })
        }
    };

    let meta = PageMeta {
        h1: fields.h1.unwrap_or_else(|| title.clone()),
        title,
        h1_prefix: fields.h1_prefix,
        description: fields.description,
        keywords: fields.keywords,
        custom_layout: fields.custom_layout,
        has_nav: fields.has_nav.unwrap_or(true),
    };

    let rel = page_ref
        .content_path
        .strip_prefix(release_dir)
        .unwrap_or(&page_ref.content_path);
    let content_ref = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    Ok(PageDefinition::new(
        page_ref.url_path.clone(),
        meta,
        ContentRef(content_ref),
    ))
}
