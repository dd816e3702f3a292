//! Page discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the building
//! phase (creating page definitions). The Scanner only identifies page files
//! and their sidecars, returning lightweight references for `FsSource` to process.

use std::fs;
use std::path::{Path, PathBuf};

/// Reference to a page's source files.
///
/// Contains only file locations - no content is read at this stage.
#[derive(Debug, Clone)]
pub(crate) struct PageRef {
    /// URL path (e.g., "/docs/about/01_overview")
    pub url_path: String,
    /// Directory of the page relative to `pages/` (e.g., "docs/about", "" for root)
    pub dir: String,
    /// Path to the page markup
    pub content_path: PathBuf,
    /// Path to the `<stem>.yaml` sidecar, if present
    pub sidecar_path: Option<PathBuf>,
}

/// Discovers page references under a release's `pages/` directory.
///
/// Entries are visited in name order, so references come out sorted by
/// directory and then by file name.
pub(crate) struct Scanner {
    pages_dir: PathBuf,
    extensions: Vec<String>,
}

impl Scanner {
    /// Create a new Scanner.
    ///
    /// # Arguments
    ///
    /// * `pages_dir` - Root directory to scan
    /// * `extensions` - Bare file extensions treated as pages (e.g., "js")
    pub fn new(pages_dir: PathBuf, extensions: Vec<String>) -> Self {
        Self {
            pages_dir,
            extensions,
        }
    }

    /// Scan the pages directory and return page references.
    ///
    /// Returns an empty Vec if the directory doesn't exist.
    pub fn scan(&self) -> Vec<PageRef> {
        let mut refs = Vec::new();
        if self.pages_dir.is_dir() {
            self.scan_directory(&self.pages_dir, "", &mut refs);
        }
        refs
    }

    /// Collect page files in `dir_path`, then recurse into subdirectories.
    fn scan_directory(&self, dir_path: &Path, dir_rel: &str, refs: &mut Vec<PageRef>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            tracing::warn!(path = %dir_path.display(), "Failed to read directory, skipping");
            return;
        };

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e.path(), is_dir, name)
            })
            .filter(|(_, _, name)| !name.starts_with('.'))
            .collect();
        entries.sort_by(|a, b| a.2.cmp(&b.2));

        let mut subdirs = Vec::new();
        for (path, is_dir, name) in entries {
            if is_dir {
                subdirs.push((path, name));
                continue;
            }
            let Some(stem) = self.page_stem(&name) else {
                continue;
            };

            let url_path = if dir_rel.is_empty() {
                format!("/{stem}")
            } else {
                format!("/{dir_rel}/{stem}")
            };
            let sidecar = dir_path.join(format!("{stem}.yaml"));
            refs.push(PageRef {
                url_path,
                dir: dir_rel.to_owned(),
                sidecar_path: sidecar.is_file().then_some(sidecar),
                content_path: path,
            });
        }

        for (path, name) in subdirs {
            let child_rel = if dir_rel.is_empty() {
                name
            } else {
                format!("{dir_rel}/{name}")
            };
            self.scan_directory(&path, &child_rel, refs);
        }
    }

    /// File stem if `name` carries one of the page extensions.
    fn page_stem<'a>(&self, name: &'a str) -> Option<&'a str> {
        let (stem, ext) = name.rsplit_once('.')?;
        (!stem.is_empty() && self.extensions.iter().any(|e| e == ext)).then_some(stem)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn scanner(dir: &Path) -> Scanner {
        Scanner::new(dir.to_path_buf(), vec!["js".to_owned(), "vue".to_owned()])
    }

    #[test]
    fn test_scan_missing_dir() {
        let refs = scanner(Path::new("/nonexistent/pages")).scan();
        assert!(refs.is_empty());
    }

    #[test]
    fn test_scan_finds_pages_in_sorted_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let about = temp_dir.path().join("docs/about");
        fs::create_dir_all(&about).unwrap();
        fs::write(about.join("02_introduction.js"), "").unwrap();
        fs::write(about.join("01_overview.js"), "").unwrap();
        fs::write(temp_dir.path().join("index.vue"), "").unwrap();

        let refs = scanner(temp_dir.path()).scan();
        let urls: Vec<_> = refs.iter().map(|r| r.url_path.as_str()).collect();

        assert_eq!(
            urls,
            vec![
                "/index",
                "/docs/about/01_overview",
                "/docs/about/02_introduction"
            ]
        );
        assert_eq!(refs[1].dir, "docs/about");
        assert_eq!(refs[0].dir, "");
    }

    #[test]
    fn test_scan_ignores_other_extensions() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("page.js"), "").unwrap();
        fs::write(temp_dir.path().join("page.yaml"), "title: Page").unwrap();
        fs::write(temp_dir.path().join("notes.md"), "# Notes").unwrap();
        fs::write(temp_dir.path().join("meta.yaml"), "keywords: a").unwrap();

        let refs = scanner(temp_dir.path()).scan();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].url_path, "/page");
    }

    #[test]
    fn test_scan_links_sidecar() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("with.js"), "").unwrap();
        fs::write(temp_dir.path().join("with.yaml"), "title: With").unwrap();
        fs::write(temp_dir.path().join("without.js"), "").unwrap();

        let refs = scanner(temp_dir.path()).scan();

        let with = refs.iter().find(|r| r.url_path == "/with").unwrap();
        assert!(with.sidecar_path.as_ref().unwrap().ends_with("with.yaml"));
        let without = refs.iter().find(|r| r.url_path == "/without").unwrap();
        assert!(without.sidecar_path.is_none());
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".draft.js"), "").unwrap();
        fs::create_dir(temp_dir.path().join(".cache")).unwrap();
        fs::write(temp_dir.path().join(".cache/page.js"), "").unwrap();
        fs::write(temp_dir.path().join("visible.js"), "").unwrap();

        let refs = scanner(temp_dir.path()).scan();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].url_path, "/visible");
    }

    #[test]
    fn test_scan_custom_extensions() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("a.js"), "").unwrap();
        fs::write(temp_dir.path().join("b.html"), "").unwrap();

        let refs = Scanner::new(temp_dir.path().to_path_buf(), vec!["html".to_owned()]).scan();

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].url_path, "/b");
    }
}
