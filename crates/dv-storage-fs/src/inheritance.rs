//! Metadata inheritance logic for page discovery.
//!
//! Provides functions for building directory ancestor chains and merging
//! metadata from parent directories down to pages.

use crate::yaml::PageFields;

/// Build ancestor chain for a directory relative to `pages/`.
///
/// Returns ancestors from root to the directory itself.
/// E.g., `"docs/about"` → `["", "docs", "docs/about"]`
#[must_use]
pub(crate) fn build_ancestor_chain(dir: &str) -> Vec<String> {
    let mut ancestors = vec![String::new()]; // Root is always first

    if !dir.is_empty() {
        let mut current = String::new();
        for part in dir.split('/') {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);
            ancestors.push(current.clone());
        }
    }

    ancestors
}

/// Merge child metadata with parent metadata following inheritance rules.
///
/// # Inheritance Rules
///
/// - `title`, `h1`, `h1_prefix`: Never inherited (child's value or `None`)
/// - `description`, `keywords`, `custom_layout`, `has_nav`: Inherited
///   when the child leaves them unset
#[must_use]
pub(crate) fn merge_metadata(parent: &PageFields, child: &PageFields) -> PageFields {
    PageFields {
        title: child.title.clone(),
        h1: child.h1.clone(),
        h1_prefix: child.h1_prefix.clone(),
        description: child.description.clone().or_else(|| parent.description.clone()),
        keywords: child.keywords.clone().or_else(|| parent.keywords.clone()),
        custom_layout: child
            .custom_layout
            .clone()
            .or_else(|| parent.custom_layout.clone()),
        has_nav: child.has_nav.or(parent.has_nav),
    }
}
