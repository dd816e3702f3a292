//! Error type for the filesystem source.

use std::path::PathBuf;

use dv_site::Channel;

/// Failure while reading a release tree.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// A file or directory could not be read.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A navigation or site override file is not valid YAML.
    #[error("invalid YAML in {}: {source}", .path.display())]
    Yaml {
        /// Offending file.
        path: PathBuf,
        /// Parser error with location.
        #[source]
        source: serde_yaml::Error,
    },
    /// The release directory does not exist or has no `pages/` directory.
    #[error("release {release} not found in {channel} channel (expected {})", .path.display())]
    MissingRelease {
        /// Channel searched.
        channel: Channel,
        /// Requested release id.
        release: String,
        /// Expected `pages/` directory.
        path: PathBuf,
    },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
