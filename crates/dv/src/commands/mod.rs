//! CLI command implementations.

mod build;
mod check;
mod releases;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use dv_config::{CliSettings, Config};
use dv_site::{Channel, ReleaseBundle, SiteSettings, sort_releases};
use dv_storage_fs::{FsSource, ReleaseDir};
use rayon::prelude::*;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use releases::ReleasesArgs;

use crate::error::CliError;

/// Options shared by every command that reads the docs tree.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover dv.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs root holding `docs/` and `docs-unstable/` (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Load configuration with the source and output directory overrides applied.
    fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Release channel selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ChannelArg {
    /// Published releases under `docs/`.
    Stable,
    /// Pre-release builds under `docs-unstable/`.
    Unstable,
}

impl From<ChannelArg> for Channel {
    fn from(arg: ChannelArg) -> Self {
        match arg {
            ChannelArg::Stable => Self::Stable,
            ChannelArg::Unstable => Self::Unstable,
        }
    }
}

/// Filesystem source configured from `config`.
fn open_source(config: &Config) -> FsSource {
    FsSource::new(config.docs_resolved.source_dir.clone())
        .with_page_extensions(config.docs_resolved.page_extensions.clone())
        .with_meta_filename(config.metadata.name.as_str())
        .with_nav_filename(config.nav.filename.as_str())
}

/// Discovered releases, narrowed to a channel and/or release.
///
/// `release` matches either the release id or the directory name. Also
/// returns the release ids of each channel, used as the selectable list in
/// every bundle of that channel.
fn select_releases(
    source: &FsSource,
    channel: Option<ChannelArg>,
    release: Option<&str>,
) -> Result<(Vec<ReleaseDir>, Vec<(Channel, Vec<String>)>), CliError> {
    let all = source.discover_releases()?;
    let known: Vec<(Channel, Vec<String>)> = Channel::ALL
        .into_iter()
        .map(|c| {
            let mut names: Vec<String> = all
                .iter()
                .filter(|r| r.channel == c)
                .map(|r| r.release.clone())
                .collect();
            sort_releases(&mut names);
            names.dedup();
            (c, names)
        })
        .collect();

    let channel = channel.map(Channel::from);
    let selected: Vec<_> = all
        .into_iter()
        .filter(|r| channel.is_none_or(|c| r.channel == c))
        .filter(|r| release.is_none_or(|id| r.release == id || r.dir_name == id))
        .collect();

    if let Some(id) = release
        && selected.is_empty()
    {
        return Err(CliError::Validation(format!(
            "release {id} not found under {}",
            source.root().display()
        )));
    }
    Ok((selected, known))
}

/// Releases of `channel` from the lists built by [`select_releases`].
fn known_for(known: &[(Channel, Vec<String>)], channel: Channel) -> &[String] {
    known
        .iter()
        .find(|(c, _)| *c == channel)
        .map(|(_, names)| names.as_slice())
        .unwrap_or_default()
}

/// Load and build one release.
fn build_release(
    source: &FsSource,
    release: &ReleaseDir,
    known_releases: &[String],
    settings: &SiteSettings,
) -> Result<ReleaseBundle, CliError> {
    let loaded = source.load_release(release.channel, &release.dir_name, settings)?;
    let bundle = ReleaseBundle::build(
        &loaded.release,
        known_releases,
        &loaded.settings,
        &loaded.pages,
        &loaded.nav,
    )?;
    Ok(bundle)
}

/// Build every selected release in parallel, keeping discovery order.
fn build_all(
    source: &FsSource,
    releases: Vec<ReleaseDir>,
    known: &[(Channel, Vec<String>)],
    settings: &SiteSettings,
) -> Vec<(ReleaseDir, Result<ReleaseBundle, CliError>)> {
    releases
        .into_par_iter()
        .map(|release| {
            let result = build_release(
                source,
                &release,
                known_for(known, release.channel),
                settings,
            );
            (release, result)
        })
        .collect()
}
