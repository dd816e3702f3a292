//! Release selection across documentation snapshots.
//!
//! Each release is built into its own [`ReleaseBundle`]. The
//! [`ReleaseCatalog`] groups bundles by [`Channel`] and resolves incoming
//! release identifiers to the active bundle.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::bundle::ReleaseBundle;
use crate::error::SiteError;
use crate::site_config::SiteConfig;

/// Publication channel of a release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Published releases under `docs/`.
    Stable,
    /// Pre-release builds under `docs-unstable/`.
    Unstable,
}

impl Channel {
    /// All channels in listing order.
    pub const ALL: [Self; 2] = [Self::Stable, Self::Unstable];

    /// Directory holding this channel's releases.
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Stable => "docs",
            Self::Unstable => "docs-unstable",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stable => f.write_str("stable"),
            Self::Unstable => f.write_str("unstable"),
        }
    }
}

/// Compare release identifiers naturally.
///
/// Runs of digits compare as numbers, everything else compares as text, so
/// `3.10.0` sorts after `3.9.2` and `2.0.0-1909211023` after
/// `2.0.0-1909130555`.
#[must_use]
pub fn compare_release_ids(a: &str, b: &str) -> Ordering {
    let mut left = Segments::new(a);
    let mut right = Segments::new(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l, r) {
                    (Segment::Number(l), Segment::Number(r)) => {
                        let (l, r) = (l.trim_start_matches('0'), r.trim_start_matches('0'));
                        l.len().cmp(&r.len()).then_with(|| l.cmp(r))
                    }
                    (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
                    (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
                    (Segment::Text(l), Segment::Text(r)) => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Sort release identifiers oldest first.
pub fn sort_releases(releases: &mut [String]) {
    releases.sort_by(|a, b| compare_release_ids(a, b));
}

enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Segments<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let numeric = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if numeric {
            Segment::Number(head)
        } else {
            Segment::Text(head)
        })
    }
}

/// Resolve a requested release among built site configurations.
///
/// # Errors
///
/// Returns [`SiteError::UnknownRelease`] if no configuration has a matching
/// `release`.
pub fn resolve_release<'a, I>(requested: &str, available: I) -> Result<&'a SiteConfig, SiteError>
where
    I: IntoIterator<Item = &'a SiteConfig>,
    I::IntoIter: Clone,
{
    let available = available.into_iter();
    available
        .clone()
        .find(|config| config.release == requested)
        .ok_or_else(|| unknown_release(requested, available))
}

fn unknown_release<'a>(
    requested: &str,
    available: impl Iterator<Item = &'a SiteConfig>,
) -> SiteError {
    SiteError::UnknownRelease {
        requested: requested.to_owned(),
        available: available.map(|c| c.release.clone()).collect(),
    }
}

/// Built release bundles grouped by channel.
#[derive(Debug, Default)]
pub struct ReleaseCatalog {
    entries: Vec<(Channel, ReleaseBundle)>,
}

impl ReleaseCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a built bundle, keeping each channel in release order.
    pub fn insert(&mut self, channel: Channel, bundle: ReleaseBundle) {
        self.entries.push((channel, bundle));
        self.entries.sort_by(|(ca, a), (cb, b)| {
            ca.cmp(cb)
                .then_with(|| compare_release_ids(&a.config.release, &b.config.release))
        });
    }

    /// Bundle for an exact channel and release.
    #[must_use]
    pub fn get(&self, channel: Channel, release: &str) -> Option<&ReleaseBundle> {
        self.entries
            .iter()
            .find(|(c, b)| *c == channel && b.config.release == release)
            .map(|(_, b)| b)
    }

    /// Resolve a release identifier to its bundle.
    ///
    /// Stable releases take precedence when an identifier exists in both
    /// channels.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownRelease`] if no bundle matches.
    pub fn resolve(&self, requested: &str) -> Result<&ReleaseBundle, SiteError> {
        let config = resolve_release(requested, self.configs())?;
        self.entries
            .iter()
            .map(|(_, bundle)| bundle)
            .find(|bundle| std::ptr::eq(&bundle.config, config))
            .ok_or_else(|| unknown_release(requested, self.configs()))
    }

    /// Site configurations of every bundle, in catalog order.
    pub fn configs(&self) -> impl Iterator<Item = &SiteConfig> + Clone {
        self.entries.iter().map(|(_, bundle)| &bundle.config)
    }
}
